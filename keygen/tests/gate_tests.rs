use pdv_keygen::{issue_batch, record_issued, render_issued, run_gate, GateOutcome};
use pdv_license::{
    HardwareFingerprint, IssuedHashes, LicenseManager, LicenseStore, SecretKey,
    VerificationPolicy,
};
use std::io::Cursor;
use std::path::Path;

fn secret() -> SecretKey {
    SecretKey::new("gate-test-secret")
}

fn manager(path: &Path, policy: VerificationPolicy) -> LicenseManager<HardwareFingerprint> {
    let store = LicenseStore::open(path, &secret()).unwrap();
    let machine: HardwareFingerprint = "AAAA1111BBBB2222".parse().unwrap();
    LicenseManager::from_parts(store, secret(), policy, machine)
}

fn run(manager: &LicenseManager<HardwareFingerprint>, input: &str) -> (GateOutcome, String) {
    let mut output = Vec::new();
    let outcome = run_gate(manager, Cursor::new(input.as_bytes()), &mut output).unwrap();
    (outcome, String::from_utf8(output).unwrap())
}

#[test]
fn gate_prompts_then_activates() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir.path().join("license.dat"), VerificationPolicy::Permissive);

    let (outcome, output) = run(&manager, "abcd\nabcd-efgh-ijkl-mnop\n");
    assert_eq!(outcome, GateOutcome::Activated);
    assert!(output.contains("no license installed"));
    assert!(output.contains("invalid license format"));
    assert!(output.contains("License activated successfully"));

    let (again, _) = run(&manager, "");
    assert_eq!(again, GateOutcome::AlreadyValid);
}

#[test]
fn gate_declines_on_empty_line_or_eof() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir.path().join("license.dat"), VerificationPolicy::Permissive);

    let (outcome, _) = run(&manager, "\n");
    assert_eq!(outcome, GateOutcome::Declined);
    assert!(!outcome.may_start());

    let (outcome, _) = run(&manager, "");
    assert_eq!(outcome, GateOutcome::Declined);
    assert!(!dir.path().join("license.dat").exists());
}

#[test]
fn gate_reprompts_on_unissued_code() {
    let dir = tempfile::tempdir().unwrap();
    let issued = issue_batch("Shop", 1, &secret());
    let list: IssuedHashes = issued.iter().map(|i| i.integrity_hash.clone()).collect();
    let manager = manager(&dir.path().join("license.dat"), VerificationPolicy::Issued(list));

    let input = format!("ABCD-EFGH-IJKL-MNOP\n{}\n", issued[0].code);
    let (outcome, output) = run(&manager, &input);
    assert_eq!(outcome, GateOutcome::Activated);
    assert!(output.contains("not issued"));
}

#[test]
fn issue_batch_count() {
    let batch = issue_batch("", 3, &secret());
    assert_eq!(batch.len(), 3);
    assert_ne!(batch[0].code, batch[1].code);
}

#[test]
fn render_shows_code_and_client() {
    let issued = &issue_batch("Tienda ABC", 1, &secret())[0];
    let shown = render_issued(issued);
    assert!(shown.contains(issued.code.as_str()));
    assert!(shown.contains("Client: Tienda ABC"));
    assert!(!shown.contains(&issued.integrity_hash));
}

#[test]
fn record_issued_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("licenses_generated.txt");
    let list = dir.path().join("issued_hashes.txt");
    let issued = &issue_batch("Shop", 1, &secret())[0];

    record_issued(issued, &log, Some(&list)).unwrap();

    assert!(std::fs::read_to_string(&log).unwrap().contains(issued.code.as_str()));
    assert!(IssuedHashes::load(&list).unwrap().contains(&issued.integrity_hash));
}
