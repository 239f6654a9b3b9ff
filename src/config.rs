//! Configuration for container inspection.
//!
//! Provides the plausibility limits used by the validators and the tuning
//! knobs of the default pointer oracle. Build the configuration before a
//! fault handler is armed; inspection itself only reads it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::memory::HeuristicOracle;

/// Element counts above this are treated as garbage.
pub const DEFAULT_MAX_ELEMENTS: usize = 0x100_0000;

/// Master configuration for container inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Largest element count a container may report and still be plausible.
    /// Also bounds the link walk of containers without a size field.
    pub max_elements: usize,
    /// Default pointer oracle configuration.
    pub oracle: OracleConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
            oracle: OracleConfig::default(),
        }
    }
}

impl InspectConfig {
    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The pointer oracle described by this configuration's
    /// [`OracleConfig`]. Hand it to the memory view; the inspector itself
    /// only applies the limits.
    pub fn oracle(&self) -> HeuristicOracle {
        HeuristicOracle::new(&self.oracle)
    }
}

/// Tuning for [`crate::memory::HeuristicOracle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Addresses below this are never mapped (null page guard).
    pub min_address: u64,
    /// Highest address a user-space pointer may hold.
    pub max_address: u64,
    /// Required alignment of pointers to container internals (1 = none).
    pub pointer_alignment: u64,
    /// 32-bit debug-heap fill patterns; a pointer equal to one of these,
    /// replicated to word width, is rejected.
    pub fill_patterns: Vec<u32>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            min_address: 0x1_0000,
            max_address: default_max_address(),
            pointer_alignment: 1,
            fill_patterns: vec![
                0xCDCD_CDCD, // uninitialized heap
                0xDDDD_DDDD, // freed heap
                0xFDFD_FDFD, // no-man's land
                0xFEEE_FEEE, // freed (HeapFree)
                0xABAB_ABAB, // guard bytes after allocation
                0xBAAD_F00D, // uninitialized (LocalAlloc)
                0xDEAD_BEEF,
            ],
        }
    }
}

#[cfg(target_pointer_width = "64")]
fn default_max_address() -> u64 {
    // top of the canonical lower half (x86-64 / AArch64 48-bit user space)
    0x0000_7FFF_FFFF_FFFF
}

#[cfg(not(target_pointer_width = "64"))]
fn default_max_address() -> u64 {
    usize::MAX as u64
}
