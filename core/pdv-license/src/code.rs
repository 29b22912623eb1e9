//! License codes: generation, normalization and shape validation.
//!
//! Codes are displayed as `XXXX-XXXX-XXXX-XXXX`: 16 characters of the
//! RFC 4648 base-32 alphabet, grouped by four. A code says nothing about the
//! machine it will run on; binding happens at activation.

use crate::secret::SecretKey;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of significant characters in a code.
pub const CODE_LEN: usize = 16;

/// Characters per display group.
pub const GROUP_LEN: usize = 4;

/// Random bytes drawn per generated code.
const RANDOM_BYTES: usize = 12;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Error for input that does not have the shape of a license code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid license format: expected {len} characters, found {found}", len = CODE_LEN)]
pub struct CodeFormatError {
    /// Significant characters found after normalization.
    pub found: usize,
}

/// A license code in canonical `XXXX-XXXX-XXXX-XXXX` form.
///
/// Deserializing runs the same shape check as [`LicenseCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseCode(String);

impl LicenseCode {
    /// Generates a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; RANDOM_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let mut encoded = base32_encode(&bytes);
        encoded.truncate(CODE_LEN);
        Self(group(&encoded))
    }

    /// Parses user input into a canonical code.
    ///
    /// Surrounding whitespace and embedded spaces are dropped and letters are
    /// uppercased. Hyphens are ignored for the length check and re-inserted
    /// every four characters.
    pub fn parse(input: &str) -> Result<Self, CodeFormatError> {
        let normalized = normalize(input);
        let significant: String = normalized.chars().filter(|c| *c != '-').collect();
        let found = significant.chars().count();
        if found != CODE_LEN {
            return Err(CodeFormatError { found });
        }
        Ok(Self(group(&significant)))
    }

    /// Returns the canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Computes the integrity hash binding this code to `secret`.
    #[must_use]
    pub fn integrity_hash(&self, secret: &SecretKey) -> String {
        secret.integrity_hash(&self.0)
    }
}

impl fmt::Display for LicenseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LicenseCode {
    type Err = CodeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LicenseCode {
    type Error = CodeFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LicenseCode> for String {
    fn from(code: LicenseCode) -> Self {
        code.0
    }
}

/// Trims, uppercases and removes embedded spaces.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ')
        .collect()
}

/// Generates a code and its integrity hash under `secret`.
#[must_use]
pub fn generate_code(secret: &SecretKey) -> (LicenseCode, String) {
    let code = LicenseCode::generate();
    let hash = code.integrity_hash(secret);
    (code, hash)
}

/// Inserts a hyphen every [`GROUP_LEN`] characters.
fn group(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(GROUP_LEN)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// RFC 4648 base-32 without padding.
fn base32_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(BASE32_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }
    if bits > 0 {
        result.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base32_matches_rfc4648_vectors() {
        assert_eq!(base32_encode(b""), "");
        assert_eq!(base32_encode(b"f"), "MY");
        assert_eq!(base32_encode(b"fo"), "MZXQ");
        assert_eq!(base32_encode(b"foo"), "MZXW6");
        assert_eq!(base32_encode(b"foob"), "MZXW6YQ");
        assert_eq!(base32_encode(b"fooba"), "MZXW6YTB");
        assert_eq!(base32_encode(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn group_inserts_hyphens() {
        assert_eq!(group("ABCDEFGHIJKLMNOP"), "ABCD-EFGH-IJKL-MNOP");
    }
}
