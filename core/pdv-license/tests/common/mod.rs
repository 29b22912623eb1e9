//! Shared test helpers for license tests.

#![allow(dead_code)]

use pdv_crypto::DerivedKey;
use pdv_license::{
    HardwareFingerprint, LicenseManager, LicenseStore, SecretKey, VerificationPolicy,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Fingerprint of the machine the tests pretend to run on.
pub const THIS_MACHINE: &str = "AAAA1111BBBB2222";

/// Fingerprint of some other machine.
pub const OTHER_MACHINE: &str = "CCCC3333DDDD4444";

/// Secret shared by every helper in a test binary.
pub fn test_secret() -> SecretKey {
    SecretKey::new("test-secret-for-license-tests")
}

/// Key derived from [`test_secret`], computed once per test binary.
pub fn test_key() -> DerivedKey {
    static KEY: OnceLock<DerivedKey> = OnceLock::new();
    KEY.get_or_init(|| test_secret().derive().unwrap()).clone()
}

pub fn fingerprint(id: &str) -> HardwareFingerprint {
    id.parse().unwrap()
}

/// Returns a fresh temp dir and the license path inside a nested `data/` dir.
pub fn license_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("license.dat");
    (dir, path)
}

pub fn store_at(path: &Path) -> LicenseStore {
    LicenseStore::with_key(path, test_key())
}

/// A permissive manager pinned to `machine`.
pub fn manager_at(path: &Path, machine: &str) -> LicenseManager<HardwareFingerprint> {
    manager_with_policy(path, machine, VerificationPolicy::Permissive)
}

pub fn manager_with_policy(
    path: &Path,
    machine: &str,
    policy: VerificationPolicy,
) -> LicenseManager<HardwareFingerprint> {
    LicenseManager::from_parts(store_at(path), test_secret(), policy, fingerprint(machine))
}
