//! Error types for stlscope.
//!
//! Inspection outcomes (`Unknown`, `Invalid`) are ordinary values returned by
//! [`crate::containers::inspect`]; this module covers the ambient surface:
//! pattern compilation and configuration loading.

use thiserror::Error;

use crate::containers::ContainerKind;

/// Main error type for stlscope's setup operations.
#[derive(Debug, Error)]
pub enum StlScopeError {
    /// A wildcard pattern could not be compiled
    #[error("Invalid wildcard pattern {pattern:?}: {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization errors
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for stlscope setup operations
pub type Result<T> = std::result::Result<T, StlScopeError>;

/// Why a blob could not be introspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InspectError {
    /// No registered container kind matches the type name.
    #[error("not a known container type")]
    Unknown,
    /// The type name matched, but the blob failed the plausibility checks.
    #[error("{kind} failed plausibility checks")]
    Invalid { kind: ContainerKind },
}

/// Closed set of numeric result codes for callers that speak integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    ContainerUnknown = 1,
    ContainerInvalid = 2,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<InspectError> for ErrorCode {
    fn from(err: InspectError) -> Self {
        match err {
            InspectError::Unknown => ErrorCode::ContainerUnknown,
            InspectError::Invalid { .. } => ErrorCode::ContainerInvalid,
        }
    }
}

impl<T> From<&std::result::Result<T, InspectError>> for ErrorCode {
    fn from(res: &std::result::Result<T, InspectError>) -> Self {
        match res {
            Ok(_) => ErrorCode::Success,
            Err(e) => ErrorCode::from(*e),
        }
    }
}
