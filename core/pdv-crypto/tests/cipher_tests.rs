use base64::{engine::general_purpose::URL_SAFE, Engine};
use pdv_crypto::{open, seal, CryptoError, DerivedKey, NONCE_SIZE, SEAL_OVERHEAD};

fn key(byte: u8) -> DerivedKey {
    DerivedKey::from_bytes([byte; 32])
}

fn reseal_bytes(blob: &[u8]) -> String {
    URL_SAFE.encode(blob)
}

#[test]
fn seal_open_roundtrip() {
    let plaintext = br#"{"license_code":"ABCD-EFGH-IJKL-MNOP"}"#;
    let sealed = seal(&key(1), plaintext).unwrap();
    assert_eq!(open(&key(1), &sealed).unwrap(), plaintext);
}

#[test]
fn seal_open_empty() {
    let sealed = seal(&key(1), b"").unwrap();
    assert_eq!(URL_SAFE.decode(&sealed).unwrap().len(), SEAL_OVERHEAD);
    assert_eq!(open(&key(1), &sealed).unwrap(), b"");
}

#[test]
fn sealed_length_is_plaintext_plus_overhead() {
    let sealed = seal(&key(1), &[0u8; 100]).unwrap();
    assert_eq!(URL_SAFE.decode(&sealed).unwrap().len(), 100 + SEAL_OVERHEAD);
}

#[test]
fn wrong_key_fails_open() {
    let sealed = seal(&key(1), b"Secret").unwrap();
    assert!(matches!(open(&key(2), &sealed), Err(CryptoError::Decryption(_))));
}

#[test]
fn tampered_ciphertext_fails_open() {
    let mut blob = URL_SAFE.decode(seal(&key(1), b"Secret").unwrap()).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0xFF;
    assert!(open(&key(1), &reseal_bytes(&blob)).is_err());
}

#[test]
fn tampered_nonce_fails_open() {
    let mut blob = URL_SAFE.decode(seal(&key(1), b"Secret").unwrap()).unwrap();
    blob[NONCE_SIZE - 1] ^= 0x01;
    assert!(open(&key(1), &reseal_bytes(&blob)).is_err());
}

#[test]
fn truncated_blob_fails_open() {
    let mut blob = URL_SAFE.decode(seal(&key(1), b"Secret").unwrap()).unwrap();
    blob.pop();
    assert!(open(&key(1), &reseal_bytes(&blob)).is_err());
}

#[test]
fn same_plaintext_seals_differently() {
    let s1 = seal(&key(1), b"Same").unwrap();
    let s2 = seal(&key(1), b"Same").unwrap();
    assert_ne!(s1, s2);
    assert_ne!(s1[..16], s2[..16]);
}

// ── Text form ────────────────────────────────────────────────────

#[test]
fn sealed_text_is_url_safe() {
    for _ in 0..16 {
        let sealed = seal(&key(3), &[0xFF; 40]).unwrap();
        assert!(!sealed.contains('+'));
        assert!(!sealed.contains('/'));
        assert!(!sealed.contains('\n'));
    }
}

#[test]
fn open_rejects_garbage() {
    let err = open(&key(1), "not base64 at all!").unwrap_err();
    assert!(err.to_string().contains("invalid base64"));
}

#[test]
fn open_rejects_short_data() {
    let err = open(&key(1), "AAAA").unwrap_err();
    assert!(err.to_string().contains("too short"));
}
