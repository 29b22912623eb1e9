//! Sealed text blobs using ChaCha20-Poly1305.
//!
//! A sealed blob is the URL-safe base64 text of `nonce || ciphertext`, where
//! the ciphertext carries the Poly1305 tag. It is the whole content of a
//! license file: no header, no trailing newline.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use base64::{engine::general_purpose::URL_SAFE, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

const TAG_SIZE: usize = 16;

/// Bytes a sealed blob carries on top of the plaintext, before base64.
pub const SEAL_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Encrypts `plaintext` under a fresh random nonce and encodes it as text.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<String> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut blob = vec![0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut blob);
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&blob), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    blob.extend_from_slice(&ciphertext);

    Ok(URL_SAFE.encode(&blob))
}

/// Decodes and decrypts a blob produced by [`seal`].
///
/// Fails if the text is not base64, is too short to hold a nonce and tag,
/// was sealed under another key, or has any byte altered.
pub fn open(key: &DerivedKey, sealed: &str) -> CryptoResult<Vec<u8>> {
    let blob = URL_SAFE
        .decode(sealed)
        .map_err(|e| CryptoError::Decryption(format!("invalid base64: {e}")))?;
    if blob.len() < SEAL_OVERHEAD {
        return Err(CryptoError::Decryption("data too short".to_string()));
    }

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    ChaCha20Poly1305::new(key.as_bytes().into())
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            CryptoError::Decryption("wrong key or tampered data".to_string())
        })
}
