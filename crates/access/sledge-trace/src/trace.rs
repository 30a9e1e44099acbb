use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;
use sledge_core::access::MemoryAccess;
use sledge_core::memory::RowPtr;

/// One primitive operation observed by the trace backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// A word load at the given address
    ReadWord(usize),
    /// A cache-line flush at the given address
    FlushLine(usize),
    /// A full memory fence
    Fence,
    /// A load fence
    LoadFence,
    /// A cycle-counter read
    ReadTimer,
}

/// Recording access backend with a synthetic cycle clock.
///
/// Every primitive call is appended to an op log in issue order. Word
/// loads and line flushes advance an internal clock by configurable costs,
/// so a classifier measuring through this backend sees exactly
/// `trials * (2 * read_cost + 2 * flush_cost)` elapsed cycles and tests
/// can place a measurement on either side of a threshold deterministically.
///
/// An armed fault address makes the next load of that address panic,
/// modeling the one observable effect a flipped bit has on real hardware:
/// the platform dies mid-scan instead of any value being returned.
#[derive(Default)]
pub struct TraceAccess {
    ops: RefCell<Vec<Op>>,
    clock: Cell<u64>,
    read_cost: u64,
    flush_cost: u64,
    fault_addr: Cell<Option<usize>>,
    words: RefCell<HashMap<usize, u64>>,
}

impl TraceAccess {
    /// Creates a backend with zero-cost ops.
    pub fn new() -> Self {
        TraceAccess::default()
    }

    /// Creates a backend whose loads and flushes advance the clock.
    pub fn with_costs(read_cost: u64, flush_cost: u64) -> Self {
        TraceAccess {
            read_cost,
            flush_cost,
            ..TraceAccess::default()
        }
    }

    /// Arms an injected uncorrectable-error fault at `addr`.
    ///
    /// The next load of `addr` panics instead of returning, standing in
    /// for the platform lock-up a real flipped bit triggers during the
    /// region scan.
    pub fn fault_on_read(&self, addr: RowPtr) {
        debug!("arming injected fault at {:p}", addr);
        self.fault_addr.set(Some(addr as usize));
    }

    /// Sets the value future loads of `addr` return.
    pub fn set_word(&self, addr: RowPtr, value: u64) {
        self.words.borrow_mut().insert(addr as usize, value);
    }

    /// The recorded op stream, in issue order.
    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    /// Addresses of all recorded word loads, in issue order.
    pub fn reads(&self) -> Vec<usize> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::ReadWord(addr) => Some(*addr),
                _ => None,
            })
            .collect()
    }

    /// Addresses of all recorded line flushes, in issue order.
    pub fn flushes(&self) -> Vec<usize> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::FlushLine(addr) => Some(*addr),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded full fences.
    pub fn fence_count(&self) -> usize {
        self.count(Op::Fence)
    }

    /// Number of recorded load fences.
    pub fn load_fence_count(&self) -> usize {
        self.count(Op::LoadFence)
    }

    /// Discards the recorded op stream, keeping clock and configuration.
    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    fn count(&self, needle: Op) -> usize {
        self.ops.borrow().iter().filter(|&&op| op == needle).count()
    }

    fn record(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }
}

impl MemoryAccess for TraceAccess {
    unsafe fn read_word(&self, addr: RowPtr) -> u64 {
        let addr = addr as usize;
        if self.fault_addr.get() == Some(addr) {
            // the machine never completes this load
            panic!("uncorrectable memory error at {:#x}", addr);
        }
        self.record(Op::ReadWord(addr));
        self.clock.set(self.clock.get() + self.read_cost);
        self.words.borrow().get(&addr).copied().unwrap_or(0)
    }

    unsafe fn flush_line(&self, addr: RowPtr) {
        self.record(Op::FlushLine(addr as usize));
        self.clock.set(self.clock.get() + self.flush_cost);
    }

    fn fence(&self) {
        self.record(Op::Fence);
    }

    fn load_fence(&self) {
        self.record(Op::LoadFence);
    }

    fn now_cycles(&self) -> u64 {
        self.record(Op::ReadTimer);
        self.clock.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Op, TraceAccess};
    use sledge_core::access::MemoryAccess;

    #[test]
    fn test_records_ops_in_order() {
        let access = TraceAccess::new();
        unsafe {
            access.flush_line(0x40 as *const u8);
            access.fence();
            access.read_word(0x40 as *const u8);
            access.load_fence();
        }
        assert_eq!(
            access.ops(),
            vec![
                Op::FlushLine(0x40),
                Op::Fence,
                Op::ReadWord(0x40),
                Op::LoadFence,
            ]
        );
    }

    #[test]
    fn test_clock_advances_by_costs() {
        let access = TraceAccess::with_costs(150, 100);
        assert_eq!(access.now_cycles(), 0);
        unsafe {
            access.read_word(0x40 as *const u8);
            access.flush_line(0x40 as *const u8);
        }
        assert_eq!(access.now_cycles(), 250);
    }

    #[test]
    fn test_word_values() {
        let access = TraceAccess::new();
        access.set_word(0x8 as *const u8, 0xff);
        unsafe {
            assert_eq!(access.read_word(0x8 as *const u8), 0xff);
            assert_eq!(access.read_word(0x10 as *const u8), 0);
        }
    }

    #[test]
    #[should_panic(expected = "uncorrectable memory error")]
    fn test_armed_fault_panics() {
        let access = TraceAccess::new();
        access.fault_on_read(0x18 as *const u8);
        unsafe {
            access.read_word(0x18 as *const u8);
        }
    }
}
