//! Pointer plausibility oracles.
//!
//! An oracle answers one question: is this address *obviously* invalid for
//! the inspected process? It never proves an address readable; it only rules
//! out the values that uninitialized or freed memory typically holds.

use crate::config::OracleConfig;

/// Estimates whether an address is obviously invalid.
pub trait PointerOracle {
    /// Returns true when `addr` cannot be a valid pointer into the process.
    fn is_bogus(&self, addr: usize) -> bool;
}

impl<F> PointerOracle for F
where
    F: Fn(usize) -> bool,
{
    fn is_bogus(&self, addr: usize) -> bool {
        self(addr)
    }
}

/// Range, alignment and fill-pattern checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicOracle {
    min_address: u64,
    max_address: u64,
    alignment: u64,
    /// Fill patterns expanded to every width a pointer field may hold.
    poisoned: Vec<u64>,
}

impl HeuristicOracle {
    pub fn new(config: &OracleConfig) -> Self {
        let mut poisoned = Vec::with_capacity(config.fill_patterns.len() * 2);
        for &pattern in &config.fill_patterns {
            let narrow = u64::from(pattern);
            poisoned.push(narrow);
            if cfg!(target_pointer_width = "64") {
                poisoned.push(narrow << 32 | narrow);
            }
        }
        Self {
            min_address: config.min_address,
            max_address: config.max_address,
            alignment: config.pointer_alignment.max(1),
            poisoned,
        }
    }
}

impl Default for HeuristicOracle {
    fn default() -> Self {
        Self::new(&OracleConfig::default())
    }
}

impl PointerOracle for HeuristicOracle {
    fn is_bogus(&self, addr: usize) -> bool {
        let addr = addr as u64;
        if addr < self.min_address || addr > self.max_address {
            return true;
        }
        if addr % self.alignment != 0 {
            return true;
        }
        self.poisoned.contains(&addr)
    }
}
