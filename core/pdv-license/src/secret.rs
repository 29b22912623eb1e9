//! The shared trust anchor and the constants that depend on it.
//!
//! Every installation of a build carries the same secret. It keys the license
//! file and salts the integrity hash of issued codes, so the generator and the
//! application must agree on it. Override it per build with the
//! `PDV_LICENSE_SECRET` environment variable at compile time.
//!
//! The salt and iteration count are frozen: changing either makes every
//! license file written by an earlier build undecryptable.

use pdv_crypto::{derive_key, CryptoResult, DerivedKey, KdfParams, Salt, DEFAULT_ITERATIONS};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fmt;

const DEFAULT_SECRET: &str = "PuntoDeVenta_SecretKey_2024_Permanent";

/// Salt for deriving the license file key.
pub const KDF_SALT: Salt = Salt::from_bytes(*b"pdv.license.salt");

/// PBKDF2 iterations for deriving the license file key.
pub const KDF_ITERATIONS: u32 = DEFAULT_ITERATIONS;

/// The pre-shared secret compiled into the application.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Cow<'static, [u8]>);

impl SecretKey {
    /// Returns the secret baked into this build.
    #[must_use]
    pub fn embedded() -> Self {
        let secret = option_env!("PDV_LICENSE_SECRET").unwrap_or(DEFAULT_SECRET);
        Self(Cow::Borrowed(secret.as_bytes()))
    }

    /// Wraps an explicit secret.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Cow::Owned(secret.into()))
    }

    /// Returns the raw secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Derives the license file key (PBKDF2-HMAC-SHA256, fixed salt and cost).
    pub fn derive(&self) -> CryptoResult<DerivedKey> {
        derive_key(
            self.as_bytes(),
            &KDF_SALT,
            &KdfParams {
                iterations: KDF_ITERATIONS,
            },
        )
    }

    /// Computes `hex(SHA256(code ":" secret))` for a canonical license code.
    #[must_use]
    pub fn integrity_hash(&self, code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        hasher.update(b":");
        hasher.update(self.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for SecretKey {
    fn default() -> Self {
        Self::embedded()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}
