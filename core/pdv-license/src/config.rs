//! Where the license lives and how activation is configured.
//!
//! Installed (release) builds keep the license in the per-user local data
//! directory, next to the application database. Development builds keep it
//! in `data/` at the workspace root so a source checkout never touches the
//! real installation.

use crate::error::StoreResult;
use crate::policy::VerificationPolicy;
use crate::secret::SecretKey;
use std::path::{Path, PathBuf};

/// File name of the encrypted license.
pub const LICENSE_FILE_NAME: &str = "license.dat";

/// File name of the issued-hash list used by the strict policy.
pub const ISSUED_HASHES_FILE_NAME: &str = "issued_hashes.txt";

/// Application directory name under the local data directory.
pub const APP_DIR_NAME: &str = "PuntoDeVenta";

/// Inputs to the activation and validation protocol.
#[derive(Debug, Clone)]
pub struct LicenseConfig {
    /// Path of the encrypted license file.
    pub license_path: PathBuf,
    /// Trust anchor shared with the code generator.
    pub secret: SecretKey,
    /// Acceptance rule for codes during activation.
    pub policy: VerificationPolicy,
}

impl LicenseConfig {
    /// Builds a permissive configuration for an explicit license path.
    #[must_use]
    pub fn at(license_path: impl Into<PathBuf>) -> Self {
        Self {
            license_path: license_path.into(),
            secret: SecretKey::embedded(),
            policy: VerificationPolicy::Permissive,
        }
    }

    /// Resolves the configuration for the running build.
    ///
    /// With the `strict` feature the issued-hash list next to the license
    /// file is loaded and enforced.
    pub fn from_environment() -> StoreResult<Self> {
        let dir = license_dir();
        let config = Self::at(dir.join(LICENSE_FILE_NAME));
        #[cfg(feature = "strict")]
        let config = config.with_issued_list(&dir.join(ISSUED_HASHES_FILE_NAME))?;
        tracing::debug!(path = %config.license_path.display(), "License location resolved");
        Ok(config)
    }

    /// Switches to the strict policy using the list at `path`.
    pub fn with_issued_list(mut self, path: &Path) -> StoreResult<Self> {
        let issued = crate::policy::IssuedHashes::load(path)?;
        tracing::debug!(codes = issued.len(), "Strict verification enabled");
        self.policy = VerificationPolicy::Issued(issued);
        Ok(self)
    }

    /// Replaces the secret.
    #[must_use]
    pub fn with_secret(mut self, secret: SecretKey) -> Self {
        self.secret = secret;
        self
    }
}

/// Directory holding the license for this build.
#[must_use]
pub fn license_dir() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
    } else {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join("data")
    }
}
