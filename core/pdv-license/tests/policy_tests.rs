mod common;

use common::test_secret;
use pdv_license::{IssuedHashes, LicenseCode, VerificationPolicy};

#[test]
fn parse_skips_blanks_and_comments() {
    let hashes = IssuedHashes::parse("# issued 2024\n\nABCDEF\n  0123  \n#ffff\n");
    assert_eq!(hashes.len(), 2);
    assert!(hashes.contains("abcdef"));
    assert!(hashes.contains("0123"));
    assert!(!hashes.contains("ffff"));
}

#[test]
fn contains_is_case_insensitive() {
    let hashes: IssuedHashes = ["DeadBeef"].into_iter().collect();
    assert!(hashes.contains("deadbeef"));
    assert!(hashes.contains("DEADBEEF"));
}

#[test]
fn missing_list_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let hashes = IssuedHashes::load(&dir.path().join("absent.txt")).unwrap();
    assert!(hashes.is_empty());
}

#[test]
fn permissive_accepts_anything_well_formed() {
    let code = LicenseCode::parse("ABCD-EFGH-IJKL-MNOP").unwrap();
    assert!(VerificationPolicy::default().accepts(&code, &test_secret()));
}

#[test]
fn issued_policy_checks_hash_under_secret() {
    let code = LicenseCode::parse("ABCD-EFGH-IJKL-MNOP").unwrap();
    let issued: IssuedHashes = [code.integrity_hash(&test_secret())].into_iter().collect();
    let policy = VerificationPolicy::Issued(issued);

    assert!(policy.accepts(&code, &test_secret()));
    assert!(!policy.accepts(&code, &pdv_license::SecretKey::new("another build")));
}
