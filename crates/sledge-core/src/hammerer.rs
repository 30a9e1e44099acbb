//! Rowhammer hammering trait and the double-sided hammer driver.
//!
//! This module defines the [`Hammering`] trait that hammering
//! implementations implement to perform memory access patterns that induce
//! bit flips through the Rowhammer effect, and [`HammerDriver`], the
//! double-sided implementation over the [`MemoryAccess`] seam.

use log::{debug, info};

use crate::access::MemoryAccess;
use crate::config::HammerConfig;
use crate::memory::{HeapRegion, RowPair};
use crate::memory::Result as RegionResult;
use crate::util::WORD_SIZE;

/// Trait for implementing Rowhammer hammering techniques.
///
/// Implementors define a strategy for repeatedly accessing aggressor rows
/// to induce bit flips in physically adjacent DRAM rows. The access
/// pattern, pacing and iteration count are implementation-specific.
///
/// # Associated Types
///
/// * `Error` - The error type returned by hammering operations. Must implement [`std::error::Error`].
///
/// # Required Methods
///
/// Implementors must provide:
/// * [`hammer()`](Hammering::hammer) - Performs the hammering operation
pub trait Hammering {
    /// The error type returned by hammering operations.
    type Error: std::error::Error;

    /// Performs the hammering operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the implementation has a failure path; drivers
    /// whose faults are fatal rather than recoverable use an uninhabited
    /// error type.
    fn hammer(&self) -> Result<(), Self::Error>;
}

/// Error type that can never occur.
///
/// The double-sided driver has no recoverable failures: an access fault
/// mid-loop is indistinguishable from the platform halt a real
/// uncorrectable error produces, and neither returns to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Never {}

/// Double-sided hammer over one validated row pair.
///
/// The loop reads both addresses and then flushes both lines, with no
/// fence in between. That is deliberately looser than the probe sequence:
/// ordering fidelity is irrelevant here, raw access rate is everything.
/// After the loop the driver scans the provisioned region once.
pub struct HammerDriver<'a, A: MemoryAccess> {
    access: &'a A,
    region: &'a HeapRegion,
    pair: RowPair,
    config: HammerConfig,
}

impl<'a, A: MemoryAccess> HammerDriver<'a, A> {
    /// Creates a driver for one row pair.
    ///
    /// # Errors
    ///
    /// Returns [`crate::memory::RegionError::OutOfRange`] if the pair does
    /// not lie within `region`.
    pub fn new(
        access: &'a A,
        region: &'a HeapRegion,
        pair: RowPair,
        config: HammerConfig,
    ) -> RegionResult<Self> {
        region.check(pair.first())?;
        region.check(pair.second())?;
        Ok(HammerDriver {
            access,
            region,
            pair,
            config,
        })
    }

    /// Reads every machine word of the region once, in address order.
    ///
    /// The scan has no flip-detection logic of its own. Its effect is to
    /// march each word through the memory controller: a flipped bit
    /// surfaces as an uncorrectable error that locks up or reboots the
    /// platform during the read. The scan therefore either returns
    /// normally, or the host halts and the operator observes that
    /// externally; success is never a value this function produces.
    pub fn scan(&self) {
        debug!("scanning {} words for corruption", self.region.word_count());
        for offset in (0..self.region.len()).step_by(WORD_SIZE) {
            unsafe {
                self.access.read_word(self.region.addr(offset));
            }
        }
    }
}

impl<A: MemoryAccess> Hammering for HammerDriver<'_, A> {
    type Error = Never;

    fn hammer(&self) -> Result<(), Self::Error> {
        info!(
            "hammering ({:p}, {:p}) with {} read pairs",
            self.pair.first(),
            self.pair.second(),
            self.config.iterations
        );
        let (a, b) = (self.pair.first(), self.pair.second());
        for _ in 0..self.config.iterations {
            unsafe {
                self.access.read_word(a);
                self.access.read_word(b);
                self.access.flush_line(a);
                self.access.flush_line(b);
            }
        }
        self.scan();
        info!("hammering done");
        Ok(())
    }
}
