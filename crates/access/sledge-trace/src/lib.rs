//! Instrumented access backend for testing timing logic without hardware.
//!
//! This crate records the exact stream of primitive operations a probe or
//! hammer loop issues, models elapsed cycles with configurable per-op
//! costs, and can arm an injected fault that stands in for the platform
//! halt a real uncorrectable memory error produces.
//!
//! Implements the [`sledge_core::access::MemoryAccess`] trait.
//!
//! # Use Cases
//!
//! - Property tests over probe/hammer instruction ordering and counts
//! - Deterministic classifier tests with synthetic latencies
//! - Simulating flip detection, which on real hardware is a machine check
//!   rather than a software-observable value

#![warn(missing_docs)]

mod trace;

pub use trace::{Op, TraceAccess};
