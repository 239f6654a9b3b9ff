//! Reads from the current process's address space.

use std::ptr;

use super::oracle::{HeuristicOracle, PointerOracle};
use super::MemoryView;

/// A [`MemoryView`] over the live process, gated by a [`PointerOracle`].
#[derive(Debug, Clone)]
pub struct LiveMemory<O = HeuristicOracle> {
    oracle: O,
}

impl<O: PointerOracle> LiveMemory<O> {
    /// Creates a live view that reads any range whose start address the
    /// oracle accepts.
    ///
    /// # Safety
    ///
    /// The caller must ensure that every range `[addr, addr + len)` the
    /// inspection code reads after `oracle.is_bogus(addr)` returned false is
    /// mapped and readable for the lifetime of the returned value. With
    /// [`HeuristicOracle`] this holds for well-formed containers and is a
    /// best-effort bet for corrupted ones; a stronger oracle (for example one
    /// backed by the process memory map) narrows that bet.
    pub unsafe fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<O: PointerOracle> MemoryView for LiveMemory<O> {
    fn read_into(&self, addr: usize, buf: &mut [u8]) -> bool {
        if buf.is_empty() {
            return true;
        }
        if addr.checked_add(buf.len()).is_none() || self.oracle.is_bogus(addr) {
            return false;
        }
        // SAFETY: the oracle accepted `addr`, and the contract of
        // `LiveMemory::new` makes the caller vouch that such ranges are
        // readable. `buf` is a distinct, exclusively borrowed allocation.
        unsafe {
            ptr::copy_nonoverlapping(addr as *const u8, buf.as_mut_ptr(), buf.len());
        }
        true
    }

    fn is_bogus(&self, addr: usize) -> bool {
        self.oracle.is_bogus(addr)
    }
}
