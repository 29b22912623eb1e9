//! Which well-formed codes activation accepts.
//!
//! Historically any code with the right shape activates. The issued-list
//! policy tightens that: the code's integrity hash must appear in a list of
//! hashes written by the generator.

use crate::code::LicenseCode;
use crate::error::{StoreError, StoreResult};
use crate::secret::SecretKey;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Set of integrity hashes of issued codes (lowercase hex).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuedHashes(HashSet<String>);

impl IssuedHashes {
    /// Parses one hash per line; blank lines and `#` comments are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_ascii_lowercase)
                .collect(),
        )
    }

    /// Loads the list from `path`. A missing file is an empty list.
    pub fn load(path: &Path) -> StoreResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Issued code list missing; no code will activate");
                Ok(Self::default())
            }
            Err(source) => Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Adds a hash.
    pub fn insert(&mut self, hash: impl AsRef<str>) {
        self.0.insert(hash.as_ref().trim().to_ascii_lowercase());
    }

    /// Returns true if `hash` is listed.
    #[must_use]
    pub fn contains(&self, hash: &str) -> bool {
        self.0.contains(&hash.to_ascii_lowercase())
    }

    /// Number of listed hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no hash is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IssuedHashes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut hashes = Self::default();
        for hash in iter {
            hashes.insert(hash);
        }
        hashes
    }
}

/// Acceptance rule applied to well-formed codes during activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VerificationPolicy {
    /// Any well-formed code activates.
    #[default]
    Permissive,
    /// Only codes whose integrity hash is in the list activate.
    Issued(IssuedHashes),
}

impl VerificationPolicy {
    /// Returns true if `code` may be activated under this policy.
    #[must_use]
    pub fn accepts(&self, code: &LicenseCode, secret: &SecretKey) -> bool {
        match self {
            Self::Permissive => true,
            Self::Issued(issued) => issued.contains(&code.integrity_hash(secret)),
        }
    }
}
