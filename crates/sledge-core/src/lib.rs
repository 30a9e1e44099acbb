//! # Sledge Core
//!
//! `sledge-core` is the foundational library of the Sledge DRAM probing
//! toolkit. It distinguishes physical DRAM relationships (same row vs. row
//! conflict) of address pairs from access-latency measurements taken under
//! cache flushing and fenced ordering, and drives a double-sided hammering
//! loop against a validated row pair inside a single externally provisioned
//! heap region.
//!
//! ## Architecture Overview
//!
//! All hardware interaction goes through one seam:
//!
//! - [`access::MemoryAccess`] - Defines the primitive operations (word read,
//!   cache-line flush, fences, cycle-counter read) that every timing and
//!   hammering component is built from. Production backends call the real
//!   instructions; instrumented backends record call order and model
//!   synthetic latencies, which is what makes the timing logic testable
//!   without hardware.
//!
//! - [`hammerer::Hammering`] - Defines the interface for hammering
//!   implementations that perform the memory access patterns inducing bit
//!   flips through the Rowhammer effect.
//!
//! ## Main Components
//!
//! - [`timer::CycleTimer`] - Paired reads of the cycle counter for elapsed
//!   measurements.
//! - [`probe::PairAccessProbe`] - The flush+fence+load probe whose repeated
//!   execution amplifies the per-pair latency difference.
//! - [`classifier::BankClassifier`] - Thresholds a probe measurement into a
//!   [`classifier::RowRelation`] using calibrated [`config`] parameters.
//! - [`hammerer::HammerDriver`] - The double-sided hammering loop plus the
//!   whole-region scan that exposes corrupted words to the memory
//!   controller.
//! - [`memory`] module - The provisioned [`memory::HeapRegion`] and
//!   range-validated [`memory::RowPair`] types.
//! - [`bridge`] module - The bounded formatted-string log bridge that is the
//!   only output channel from an isolated execution context.
//!
//! ## Platform Support
//!
//! The timing protocol is calibrated for x86_64 with `clflushopt`-class
//! flushes and `rdtscp` cycle reads. The core itself is architecture
//! agnostic; backends provide the instructions.

#![warn(missing_docs)]

pub mod access;
pub mod bridge;
pub mod classifier;
pub mod config;
pub mod hammerer;
pub mod memory;
pub mod probe;
pub mod timer;
pub mod util;

pub use crate::access::MemoryAccess;
pub use crate::classifier::{BankClassifier, Measurement, RowRelation};
pub use crate::config::{ClassifierConfig, HammerConfig};
pub use crate::hammerer::{HammerDriver, Hammering};
pub use crate::memory::{HeapRegion, RowPair};
