//! # Sledge
//!
//! Sledge probes physical DRAM geometry and induces bit flips via
//! repeated, cache-bypassing memory access (the Rowhammer effect) from
//! inside a hardware-isolated execution context. The pipeline is driven by
//! a caller: classify a candidate address pair by its access latency, pick
//! a pair that row-conflicts within one bank, hammer it, scan the
//! provisioned heap for corruption.
//!
//! ## Modules
//!
//! - `access`: The primitive-operation seam every backend implements.
//! - `bridge`: The bounded formatted-string log channel out of the
//!   isolated context.
//! - `classifier`: Thresholds probe measurements into row relations.
//! - `config`: Calibrated trial counts, thresholds and iteration counts.
//! - `hammerer`: The hammering trait, double-sided driver and region scan.
//! - `memory`: The provisioned heap region and validated row pairs.
//! - `probe`: The flush+fence+load pair probe.
//! - `timer`: Paired cycle-counter reads.
//!
//! ## Access backends
//!
//! Backends are separate crates gated behind cargo features: `x86` for the
//! production instruction backend, `trace` for the instrumented recorder
//! used in tests and protocol debugging.

pub use sledge_core::*;

#[cfg(feature = "trace")]
pub use sledge_trace;
#[cfg(feature = "x86")]
pub use sledge_x86;
