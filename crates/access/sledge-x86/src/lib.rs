//! Production x86_64 access backend.
//!
//! This crate maps the [`sledge_core::access::MemoryAccess`] primitives
//! onto the real instructions the measurement protocol was calibrated
//! against: `clflushopt` line eviction, `mfence`/`lfence` ordering and
//! `rdtscp` cycle reads.
//!
//! Implements the [`sledge_core::access::MemoryAccess`] trait.
//!
//! # Use Cases
//!
//! - Probing and hammering on real hardware, inside or outside an isolated
//!   execution context
//! - Host-side threshold re-calibration runs

#![warn(missing_docs)]

#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(target_arch = "x86_64")]
pub use x86::X86Access;
