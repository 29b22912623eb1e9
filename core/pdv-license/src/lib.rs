//! Offline licensing for the point-of-sale application.
//!
//! This module handles:
//! - License code generation for the vendor
//! - One-time activation that binds a code to this machine
//! - Hardware fingerprinting for device binding
//! - Encrypted local storage of the activation
//! - Startup validation, fully offline
//!
//! # Design Principles
//!
//! - **No network**: activation and validation are local predicates over the
//!   license file, the machine fingerprint and the embedded secret
//! - **Device binding**: a license moved to another machine stops validating
//!   and must be re-activated there
//! - **Tamper evidence**: the file is sealed with an AEAD; any change reads as
//!   corrupt, and corrupt files are left in place
//!
//! # License Code Format
//!
//! Codes are formatted as `XXXX-XXXX-XXXX-XXXX` using the RFC 4648 base-32
//! alphabet. Input is trimmed, uppercased and stripped of spaces before the
//! shape check.

mod activation;
mod code;
mod config;
mod device;
mod error;
mod generator;
mod policy;
mod record;
mod secret;
mod store;

pub mod startup;

pub use activation::{InvalidReason, LicenseManager, LicenseState};
pub use code::{generate_code, normalize, CodeFormatError, LicenseCode, CODE_LEN, GROUP_LEN};
pub use config::{
    license_dir, LicenseConfig, APP_DIR_NAME, ISSUED_HASHES_FILE_NAME,
    LICENSE_FILE_NAME,
};
pub use device::{
    compute_fingerprint, FingerprintSource, HardwareFingerprint, HostFacts, HostFingerprint,
    InvalidFingerprint, FINGERPRINT_LEN,
};
pub use error::{ActivationError, StoreError, StoreResult, ValidationError};
pub use generator::{IssuedLicense, AUDIT_LOG_FILE_NAME, UNNAMED_CLIENT};
pub use policy::{IssuedHashes, VerificationPolicy};
pub use record::{LicenseRecord, RECORD_VERSION};
pub use secret::{SecretKey, KDF_ITERATIONS, KDF_SALT};
pub use startup::StartupReport;
pub use store::LicenseStore;
