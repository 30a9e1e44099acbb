//! The flush+fence+load probe over an address pair.

use crate::access::MemoryAccess;
use crate::memory::RowPair;

/// Repeated cache-bypassing access to two addresses.
///
/// One trial flushes both lines, fences, loads one word from each address
/// and ends on a load fence, so every load hits DRAM and completes before
/// anything that follows. The probe returns nothing: its effect is the
/// latency it imposes, measured by the caller bracketing the whole call
/// with [`crate::timer::CycleTimer`] reads.
///
/// A single trial is noisy. Repetition amplifies the systematic per-pair
/// delay difference rather than averaging noise away; the raw cumulative
/// elapsed time over all trials is the signal, and no statistics are
/// computed here.
pub struct PairAccessProbe<'a, A: MemoryAccess> {
    access: &'a A,
}

impl<'a, A: MemoryAccess> PairAccessProbe<'a, A> {
    /// Creates a probe over the given access backend.
    pub fn new(access: &'a A) -> Self {
        PairAccessProbe { access }
    }

    /// Runs `trials` flush/fence/load rounds over the pair.
    ///
    /// Per trial, in order: flush first line, flush second line, full
    /// fence, load first word, load second word, load fence. At
    /// `trials = 0` no instruction executes.
    pub fn probe(&self, pair: &RowPair, trials: u64) {
        let (a, b) = (pair.first(), pair.second());
        for _ in 0..trials {
            // RowPair construction proved both words readable in-region
            unsafe {
                self.access.flush_line(a);
                self.access.flush_line(b);
                self.access.fence();
                self.access.read_word(a);
                self.access.read_word(b);
                self.access.load_fence();
            }
        }
    }
}
