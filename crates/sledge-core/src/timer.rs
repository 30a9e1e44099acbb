//! Cycle-counter wrapper for elapsed measurements.

use crate::access::MemoryAccess;

/// Paired reads of the hardware cycle counter.
///
/// The timer has no side effects and no failure mode; it is used strictly
/// in pairs, `end - start` yielding the elapsed cycles of an enclosed
/// operation. It imposes no instruction ordering of its own beyond what the
/// enclosed operation already uses.
pub struct CycleTimer<'a, A: MemoryAccess> {
    access: &'a A,
}

impl<'a, A: MemoryAccess> CycleTimer<'a, A> {
    /// Creates a timer over the given access backend.
    pub fn new(access: &'a A) -> Self {
        CycleTimer { access }
    }

    /// Reads the cycle counter.
    pub fn now(&self) -> u64 {
        self.access.now_cycles()
    }

    /// Measures the cycles elapsed while running `op`.
    pub fn elapsed(&self, op: impl FnOnce()) -> u64 {
        let start = self.now();
        op();
        self.now() - start
    }
}
