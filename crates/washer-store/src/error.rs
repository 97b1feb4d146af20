//! # Store Error Types
//!
//! Error types for snapshot file and configuration operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Startup: restore_or_default logs it and starts empty                  │
//! │  Save:    shell reports it, in-memory state is unchanged               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use washer_core::CoreError;

/// Snapshot store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure reading or writing the snapshot.
    ///
    /// ## When This Occurs
    /// - Parent directory missing and `create_dirs` is off
    /// - File permissions issue
    /// - Disk full
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The company could not be encoded.
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    /// The snapshot file exists but cannot be turned back into a company.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited JSON
    /// - Duplicate washers or customer identifiers
    /// - Ledger entries pointing at unknown washers or customers
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    /// Written by a newer build.
    #[error("Unsupported snapshot version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),
}

impl StoreError {
    /// Creates a Corrupt error from any displayable cause.
    pub fn corrupt(cause: impl std::fmt::Display) -> Self {
        StoreError::Corrupt(cause.to_string())
    }
}

/// Restore-time invariant failures surface as corrupt snapshots.
///
/// ## Error Mapping
/// ```text
/// CoreError::CorruptSnapshot(msg) → StoreError::Corrupt(msg)
/// Other                           → StoreError::Corrupt(display)
/// ```
impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CorruptSnapshot(msg) => StoreError::Corrupt(msg),
            other => StoreError::corrupt(other),
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
