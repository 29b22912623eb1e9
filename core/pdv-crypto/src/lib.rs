//! Cryptographic primitives for the licensing core.
//!
//! - PBKDF2-HMAC-SHA256 key derivation from an embedded secret
//! - ChaCha20-Poly1305 sealing of small blobs (the license file)
//!
//! Both are deterministic in their inputs except for the per-encryption nonce.

mod cipher;
mod error;
mod key;

pub use cipher::{open, seal, NONCE_SIZE, SEAL_OVERHEAD};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KdfParams, Salt, DEFAULT_ITERATIONS, KEY_SIZE, SALT_SIZE};
