//! The `memory` module provides the region and address-pair model for probing.
//!
//! The `memory` module provides the following abstractions:
//! - `HeapRegion`: the single externally provisioned memory range this core
//!   is permitted to touch, validated at construction.
//! - `RowPair`: two addresses proven at construction to denote readable
//!   words inside one `HeapRegion`.
//! - `RowPtr`: the raw pointer type used for probe and hammer targets.

mod pair;
mod region;

pub use self::pair::RowPair;
pub use self::region::{HeapRegion, RegionError, Result};

/// Pointer to a word inside the provisioned heap region.
///
/// Carries no ownership; the underlying memory belongs to the enclave
/// runtime for the lifetime of the enclave.
pub type RowPtr = *const u8;
