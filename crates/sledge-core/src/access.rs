//! The hardware access seam.
//!
//! This module defines the [`MemoryAccess`] trait through which every timing
//! and hammering component touches memory and the cycle counter. Keeping the
//! primitives behind one trait is what allows the measurement protocol to be
//! exercised against an instrumented backend that records call order and
//! returns synthetic latencies instead of executing real instructions.

use crate::memory::RowPtr;

/// Trait for the primitive operations backing probes and hammer loops.
///
/// Implementors map each method onto one machine instruction (or record it,
/// for instrumented backends). The methods are deliberately minimal: no
/// batching, no implicit ordering. Callers compose them into the documented
/// flush/fence/load sequences themselves, so an instrumented implementation
/// observes exactly the access pattern the hardware would.
///
/// # Required Methods
///
/// Implementors must provide:
/// * [`read_word()`](MemoryAccess::read_word) - Load one machine word
/// * [`flush_line()`](MemoryAccess::flush_line) - Evict a cache line
/// * [`fence()`](MemoryAccess::fence) - Full memory fence
/// * [`load_fence()`](MemoryAccess::load_fence) - Load fence
/// * [`now_cycles()`](MemoryAccess::now_cycles) - Read the cycle counter
///
/// # Examples
///
/// See `sledge-x86` for the production backend and `sledge-trace` for the
/// instrumented backend used in tests.
pub trait MemoryAccess {
    /// Loads one machine word from `addr`, bypassing compiler elision.
    ///
    /// The returned value is usually discarded; the load exists for its
    /// latency and for the row activation it forces once the line has been
    /// flushed.
    ///
    /// # Safety
    ///
    /// `addr` must be mapped and readable for at least one word. A fault
    /// here is a caller defect and terminates the enclave; there is no
    /// recovery path.
    unsafe fn read_word(&self, addr: RowPtr) -> u64;

    /// Evicts the cache line containing `addr` (see [`crate::util::CL_SIZE`]),
    /// forcing the next access to that address to reach DRAM.
    ///
    /// # Safety
    ///
    /// `addr` must be mapped. Flushing an unmapped address faults on some
    /// microarchitectures.
    unsafe fn flush_line(&self, addr: RowPtr);

    /// Full memory fence: all preceding loads, stores and flushes are
    /// globally visible before any following memory operation starts.
    fn fence(&self);

    /// Load fence: all preceding loads complete before any following
    /// instruction executes. Used to keep timed loads from draining into a
    /// subsequent counter read.
    fn load_fence(&self);

    /// Reads the cycle counter.
    ///
    /// Monotonically non-decreasing under normal execution; wraparound
    /// within a measurement window is assumed not to occur. The read itself
    /// is not a serialization point; callers wanting ordering bracket the
    /// measured operation with the fences above.
    fn now_cycles(&self) -> u64;
}
