//! Error types for the licensing module.
//!
//! Each enum variant is the machine-checkable kind; `Display` is the
//! human-readable message shown at the startup gate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the license file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No license file exists yet. Routine on first run.
    #[error("no license file at {}", path.display())]
    NotFound {
        /// Where the file was expected.
        path: PathBuf,
    },

    /// The file exists but cannot be decrypted or parsed.
    #[error("license file is corrupt: {0}")]
    Corrupt(String),

    /// The filesystem refused the operation.
    #[error("license file I/O failed at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Key derivation or encryption failed.
    #[error("license crypto failed: {0}")]
    Crypto(#[from] pdv_crypto::CryptoError),
}

/// Result type for license store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from activating a code on this machine.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The input does not have the shape of a license code.
    #[error(transparent)]
    BadFormat(#[from] crate::code::CodeFormatError),

    /// The code is well formed but absent from the issued list.
    #[error("license code was not issued for this product")]
    UnknownCode,

    /// The activation could not be saved.
    #[error("failed to save license: {0}")]
    PersistFailed(#[source] StoreError),
}

/// Errors from validating the stored activation at startup.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Nothing has been activated on this installation.
    #[error("no license installed")]
    NoLicense,

    /// The license file is tampered, truncated or foreign.
    #[error("license is corrupt or invalid: {0}")]
    Corrupt(String),

    /// The license was activated on another machine.
    #[error("this license is bound to a different machine")]
    HardwareMismatch {
        /// Fingerprint stored in the record.
        expected: String,
        /// Fingerprint of this machine.
        actual: String,
    },

    /// The record says it was never activated.
    #[error("license not activated")]
    NotActivated,

    /// The license file exists but could not be read.
    #[error("license could not be read: {0}")]
    Unreadable(#[source] StoreError),
}

impl From<StoreError> for ValidationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NoLicense,
            StoreError::Corrupt(reason) => Self::Corrupt(reason),
            other => Self::Unreadable(other),
        }
    }
}
