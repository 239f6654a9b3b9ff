//! MemoryView: bounded, oracle-gated reads by raw address.
//!
//! Container handlers never dereference a pointer themselves. Every read goes
//! through a [`MemoryView`], which either returns the bytes or reports that
//! the address is not safe to touch. Two views are provided: [`LiveMemory`]
//! reads the current process, [`SnapshotMemory`] reads captured regions such
//! as the ones stored in a crash dump.

pub mod live;
pub mod oracle;

pub use live::LiveMemory;
pub use oracle::{HeuristicOracle, PointerOracle};

const WORD: usize = std::mem::size_of::<usize>();

/// Bounded memory reads by address.
pub trait MemoryView {
    /// Fill `buf` with the bytes at `[addr, addr + buf.len())`.
    /// Returns false, leaving `buf` unspecified, when the range is not readable.
    fn read_into(&self, addr: usize, buf: &mut [u8]) -> bool;

    /// The plausibility oracle for pointers into this memory.
    fn is_bogus(&self, addr: usize) -> bool;

    /// Convenience: read a native-endian pointer-sized word.
    fn read_usize(&self, addr: usize) -> Option<usize> {
        let mut b = [0u8; WORD];
        self.read_into(addr, &mut b).then(|| usize::from_ne_bytes(b))
    }

    /// Convenience: read a native-endian u32.
    fn read_u32(&self, addr: usize) -> Option<u32> {
        let mut b = [0u8; 4];
        self.read_into(addr, &mut b).then(|| u32::from_ne_bytes(b))
    }

    /// Convenience: read one byte.
    fn read_u8(&self, addr: usize) -> Option<u8> {
        let mut b = [0u8; 1];
        self.read_into(addr, &mut b).then(|| b[0])
    }
}

/// One captured range of the inspected address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    pub base: usize,
    pub data: Vec<u8>,
}

impl MemoryRegion {
    fn end(&self) -> usize {
        self.base.saturating_add(self.data.len())
    }
}

/// Captured memory regions, e.g. the memory list of a minidump.
///
/// Addresses outside every region are bogus, and so is anything the
/// configured oracle rejects.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMemory {
    /// Sorted by base address.
    regions: Vec<MemoryRegion>,
    oracle: HeuristicOracle,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_oracle(oracle: HeuristicOracle) -> Self {
        Self {
            regions: Vec::new(),
            oracle,
        }
    }

    /// Adds a region. Where regions overlap, the one with the higher base
    /// wins for addresses it covers.
    pub fn add_region(&mut self, base: usize, data: Vec<u8>) {
        let at = self.regions.partition_point(|r| r.base <= base);
        self.regions.insert(at, MemoryRegion { base, data });
    }

    pub fn with_region(mut self, base: usize, data: Vec<u8>) -> Self {
        self.add_region(base, data);
        self
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    fn slice(&self, addr: usize, len: usize) -> Option<&[u8]> {
        let end = addr.checked_add(len)?;
        let idx = self.regions.partition_point(|r| r.base <= addr).checked_sub(1)?;
        let region = &self.regions[idx];
        if end > region.end() {
            return None;
        }
        let start = addr - region.base;
        region.data.get(start..start + len)
    }
}

impl MemoryView for SnapshotMemory {
    fn read_into(&self, addr: usize, buf: &mut [u8]) -> bool {
        match self.slice(addr, buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    fn is_bogus(&self, addr: usize) -> bool {
        self.oracle.is_bogus(addr) || self.slice(addr, 1).is_none()
    }
}
