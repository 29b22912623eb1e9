//! Encrypted, single-file persistence for the license record.
//!
//! The file holds nothing but `base64url(nonce || ciphertext)` of the JSON
//! record, sealed with the key derived from the embedded secret. There is no
//! plaintext header. Writes go through a sibling temp file and a rename so a
//! crash mid-write never leaves a half-written license behind.

use crate::error::{StoreError, StoreResult};
use crate::record::{LicenseRecord, RECORD_VERSION};
use crate::secret::SecretKey;
use pdv_crypto::{seal, DerivedKey};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes the license file at one fixed path.
#[derive(Debug, Clone)]
pub struct LicenseStore {
    path: PathBuf,
    key: DerivedKey,
}

impl LicenseStore {
    /// Opens a store at `path`, deriving the file key from `secret`.
    ///
    /// Does not touch the filesystem.
    pub fn open(path: impl Into<PathBuf>, secret: &SecretKey) -> StoreResult<Self> {
        let key = secret.derive()?;
        Ok(Self::with_key(path, key))
    }

    /// Opens a store at `path` using an already derived key.
    #[must_use]
    pub fn with_key(path: impl Into<PathBuf>, key: DerivedKey) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    /// Returns the license file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encrypts `record` and replaces the license file with it.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the directory cannot be created or written.
    pub fn persist(&self, record: &LicenseRecord) -> StoreResult<()> {
        let plaintext = serde_json::to_vec(record)
            .map_err(|e| StoreError::Corrupt(format!("record not serializable: {e}")))?;
        let sealed = seal(&self.key, &plaintext)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, sealed.as_bytes()).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        info!(path = %self.path.display(), "License file written");
        Ok(())
    }

    /// Reads and decrypts the license file.
    ///
    /// Decryption and parsing succeed or fail together; a record is never
    /// returned from a file that failed authentication.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if there is no file.
    /// - [`StoreError::Corrupt`] if it does not decrypt, does not parse as a
    ///   well-formed record, or carries another schema version.
    /// - [`StoreError::Io`] for any other read failure.
    pub fn load(&self) -> StoreResult<LicenseRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No license file");
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let text = std::str::from_utf8(&bytes)
            .map_err(|_| StoreError::Corrupt("not a license file".to_string()))?;
        let plaintext =
            pdv_crypto::open(&self.key, text).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let record: LicenseRecord = serde_json::from_slice(&plaintext)
            .map_err(|e| StoreError::Corrupt(format!("invalid record: {e}")))?;
        if record.version != RECORD_VERSION {
            return Err(StoreError::Corrupt(format!(
                "invalid record: unsupported version {:?}",
                record.version
            )));
        }

        debug!(path = %self.path.display(), "License file decrypted");
        Ok(record)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
