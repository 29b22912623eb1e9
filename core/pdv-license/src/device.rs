//! Hardware fingerprinting for license binding.
//!
//! Generates a stable identifier for this machine from its primary network
//! interface address, its host name and the OS family. Used to bind an
//! activated license to the machine it was activated on.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 16;

const UNKNOWN_MAC: &str = "00:00:00:00:00:00";
const UNKNOWN_HOST: &str = "unknown";

/// Raw host attributes that feed the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFacts {
    /// Primary network interface address, lowercase colon-separated hex.
    pub mac: String,
    /// Host name.
    pub hostname: String,
    /// OS family name (`Windows`, `Linux`, `Darwin`, ...).
    pub os_family: String,
}

impl HostFacts {
    /// Collects facts about the current host.
    ///
    /// Never fails: attributes the OS refuses to report are replaced by fixed
    /// placeholders so the resulting fingerprint stays deterministic.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            mac: get_mac(),
            hostname: get_hostname(),
            os_family: os_family().to_string(),
        }
    }

    fn combined(&self) -> String {
        format!("{}:{}:{}", self.mac, self.hostname, self.os_family)
    }
}

/// A 16-character uppercase hex identifier for a machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HardwareFingerprint(String);

impl HardwareFingerprint {
    /// Computes the fingerprint of the current machine.
    #[must_use]
    pub fn compute() -> Self {
        Self::from_facts(&HostFacts::collect())
    }

    /// Derives a fingerprint from explicit host facts.
    #[must_use]
    pub fn from_facts(facts: &HostFacts) -> Self {
        let digest = Sha256::digest(facts.combined().as_bytes());
        let mut id = hex::encode_upper(digest);
        id.truncate(FINGERPRINT_LEN);
        Self(id)
    }

    /// Returns the fingerprint string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing a malformed fingerprint string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hardware fingerprint {0:?}: expected {len} uppercase hex characters", len = FINGERPRINT_LEN)]
pub struct InvalidFingerprint(pub String);

impl TryFrom<String> for HardwareFingerprint {
    type Error = InvalidFingerprint;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let valid = s.len() == FINGERPRINT_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        if valid {
            Ok(Self(s))
        } else {
            Err(InvalidFingerprint(s))
        }
    }
}

impl FromStr for HardwareFingerprint {
    type Err = InvalidFingerprint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<HardwareFingerprint> for String {
    fn from(fp: HardwareFingerprint) -> Self {
        fp.0
    }
}

/// Something that can tell which machine we are running on.
///
/// The protocol asks this seam instead of the host directly, so a fixed
/// fingerprint can stand in for the machine.
pub trait FingerprintSource {
    /// Returns the fingerprint of the machine as seen right now.
    fn fingerprint(&self) -> HardwareFingerprint;
}

/// Fingerprints the real host on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFingerprint;

impl FingerprintSource for HostFingerprint {
    fn fingerprint(&self) -> HardwareFingerprint {
        HardwareFingerprint::compute()
    }
}

impl FingerprintSource for HardwareFingerprint {
    fn fingerprint(&self) -> HardwareFingerprint {
        self.clone()
    }
}

/// Computes the fingerprint of the current machine.
#[must_use]
pub fn compute_fingerprint() -> HardwareFingerprint {
    HardwareFingerprint::compute()
}

/// Gets the primary interface MAC address.
fn get_mac() -> String {
    match mac_address::get_mac_address() {
        Ok(Some(mac)) => mac
            .bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"),
        Ok(None) => {
            tracing::warn!("no network interface address found for hardware ID");
            UNKNOWN_MAC.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read network interface address for hardware ID");
            UNKNOWN_MAC.to_string()
        }
    }
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

/// Maps the compile-time target OS onto its conventional family name.
fn os_family() -> &'static str {
    match env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_uses_colon_separator() {
        let facts = HostFacts {
            mac: "aa:bb:cc:dd:ee:ff".into(),
            hostname: "till-01".into(),
            os_family: "Linux".into(),
        };
        assert_eq!(facts.combined(), "aa:bb:cc:dd:ee:ff:till-01:Linux");
    }

    #[test]
    fn os_family_is_never_empty() {
        assert!(!os_family().is_empty());
    }
}
