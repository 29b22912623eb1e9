//! Activation and startup validation.
//!
//! `activate` binds a code to this machine and writes the record;
//! `validate` checks on every launch that the stored record decrypts and
//! names this machine. Both run once, synchronously, before the main window
//! exists. There is no background re-check, expiry or revocation.

use crate::code::LicenseCode;
use crate::config::LicenseConfig;
use crate::device::{FingerprintSource, HostFingerprint};
use crate::error::{ActivationError, StoreResult, ValidationError};
use crate::policy::VerificationPolicy;
use crate::record::LicenseRecord;
use crate::secret::SecretKey;
use crate::store::LicenseStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Why a stored license was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Activated on another machine.
    HardwareMismatch,
    /// Tampered, truncated or encrypted under another secret.
    Corrupt,
    /// Record present but not marked activated.
    NotActivated,
    /// File present but unreadable.
    Unreadable,
}

/// License state of this installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseState {
    /// Nothing activated yet.
    NoLicense,
    /// Activated on this machine.
    ValidLicense,
    /// A license exists but cannot be honored.
    InvalidLicense(InvalidReason),
}

impl LicenseState {
    /// Returns true if the application may start.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::ValidLicense)
    }
}

impl From<&Result<LicenseRecord, ValidationError>> for LicenseState {
    fn from(result: &Result<LicenseRecord, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::ValidLicense,
            Err(ValidationError::NoLicense) => Self::NoLicense,
            Err(ValidationError::Corrupt(_)) => Self::InvalidLicense(InvalidReason::Corrupt),
            Err(ValidationError::HardwareMismatch { .. }) => {
                Self::InvalidLicense(InvalidReason::HardwareMismatch)
            }
            Err(ValidationError::NotActivated) => {
                Self::InvalidLicense(InvalidReason::NotActivated)
            }
            Err(ValidationError::Unreadable(_)) => Self::InvalidLicense(InvalidReason::Unreadable),
        }
    }
}

/// Runs activation and validation against one license file.
#[derive(Debug, Clone)]
pub struct LicenseManager<F = HostFingerprint> {
    store: LicenseStore,
    secret: SecretKey,
    policy: VerificationPolicy,
    fingerprint: F,
}

impl LicenseManager<HostFingerprint> {
    /// Creates a manager for the real host from `config`.
    ///
    /// Derives the file key, which takes a noticeable fraction of a second.
    pub fn new(config: LicenseConfig) -> StoreResult<Self> {
        Self::with_fingerprint(config, HostFingerprint)
    }
}

impl<F: FingerprintSource> LicenseManager<F> {
    /// Creates a manager that identifies the machine through `fingerprint`.
    pub fn with_fingerprint(config: LicenseConfig, fingerprint: F) -> StoreResult<Self> {
        let store = LicenseStore::open(config.license_path, &config.secret)?;
        Ok(Self::from_parts(store, config.secret, config.policy, fingerprint))
    }

    /// Assembles a manager from an opened store.
    pub fn from_parts(
        store: LicenseStore,
        secret: SecretKey,
        policy: VerificationPolicy,
        fingerprint: F,
    ) -> Self {
        Self {
            store,
            secret,
            policy,
            fingerprint,
        }
    }

    /// Activates `input` on this machine, replacing any previous activation.
    ///
    /// # Errors
    ///
    /// - [`ActivationError::BadFormat`] if the input is not 16 code characters.
    /// - [`ActivationError::UnknownCode`] if the policy rejects the code.
    /// - [`ActivationError::PersistFailed`] if the record cannot be written.
    pub fn activate(&self, input: &str) -> Result<LicenseRecord, ActivationError> {
        let code = LicenseCode::parse(input)?;

        let expected_hash = code.integrity_hash(&self.secret);
        debug!(hash_prefix = &expected_hash[..8], "Computed code integrity hash");
        if !self.policy.accepts(&code, &self.secret) {
            warn!("Rejected license code absent from the issued list");
            return Err(ActivationError::UnknownCode);
        }

        let hardware_id = self.fingerprint.fingerprint();
        let record = LicenseRecord::new(code, hardware_id);
        self.store
            .persist(&record)
            .map_err(ActivationError::PersistFailed)?;

        info!(
            hardware_id = %record.hardware_id,
            path = %self.store.path().display(),
            "License activated"
        );
        Ok(record)
    }

    /// Checks the stored activation against this machine.
    ///
    /// A corrupt file is reported, never deleted.
    ///
    /// # Errors
    ///
    /// One [`ValidationError`] per failed check, in order: presence,
    /// integrity, machine binding, activation flag.
    pub fn validate(&self) -> Result<LicenseRecord, ValidationError> {
        let record = self.store.load()?;

        let current = self.fingerprint.fingerprint();
        if record.hardware_id != current {
            warn!(
                expected = %record.hardware_id,
                actual = %current,
                "License bound to a different machine"
            );
            return Err(ValidationError::HardwareMismatch {
                expected: record.hardware_id.to_string(),
                actual: current.to_string(),
            });
        }

        if !record.activated {
            return Err(ValidationError::NotActivated);
        }

        debug!(hardware_id = %current, "License valid");
        Ok(record)
    }

    /// Returns the current state without the details.
    pub fn state(&self) -> LicenseState {
        LicenseState::from(&self.validate())
    }
}
