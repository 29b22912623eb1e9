use pdv_license::{
    ActivationError, CodeFormatError, HardwareFingerprint, StoreError, ValidationError,
};
use std::io;
use std::path::PathBuf;

#[test]
fn store_not_found_names_path() {
    let err = StoreError::NotFound {
        path: PathBuf::from("data/license.dat"),
    };
    assert!(err.to_string().contains("license.dat"));
}

#[test]
fn store_io_carries_os_message() {
    let err = StoreError::Io {
        path: PathBuf::from("data"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "access is denied"),
    };
    assert!(err.to_string().contains("access is denied"));
}

#[test]
fn store_corrupt_display() {
    let err = StoreError::Corrupt("bad tag".into());
    assert!(err.to_string().contains("corrupt"));
}

#[test]
fn store_from_crypto_error() {
    let err: StoreError = pdv_crypto::CryptoError::KeyDerivation("zero".into()).into();
    assert!(matches!(err, StoreError::Crypto(_)));
}

#[test]
fn activation_bad_format_display() {
    let err: ActivationError = CodeFormatError { found: 12 }.into();
    let msg = err.to_string();
    assert_eq!(msg, "invalid license format: expected 16 characters, found 12");
}

#[test]
fn invalid_fingerprint_display() {
    let err = "abc".parse::<HardwareFingerprint>().unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid hardware fingerprint "abc": expected 16 uppercase hex characters"#
    );
}

#[test]
fn activation_persist_failed_display() {
    let err = ActivationError::PersistFailed(StoreError::Io {
        path: PathBuf::from("data"),
        source: io::Error::new(io::ErrorKind::Other, "disk full"),
    });
    let msg = err.to_string();
    assert!(msg.contains("failed to save license"));
    assert!(msg.contains("disk full"));
}

#[test]
fn validation_mismatch_mentions_machine() {
    let err = ValidationError::HardwareMismatch {
        expected: "AAAA1111BBBB2222".into(),
        actual: "CCCC3333DDDD4444".into(),
    };
    assert!(err.to_string().contains("different machine"));
}

#[test]
fn validation_from_store_error() {
    let not_found = StoreError::NotFound {
        path: PathBuf::from("x"),
    };
    assert!(matches!(
        ValidationError::from(not_found),
        ValidationError::NoLicense
    ));
    assert!(matches!(
        ValidationError::from(StoreError::Corrupt("x".into())),
        ValidationError::Corrupt(_)
    ));
    let io = StoreError::Io {
        path: PathBuf::from("x"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(matches!(
        ValidationError::from(io),
        ValidationError::Unreadable(_)
    ));
}

#[test]
fn error_is_debug() {
    let err = ValidationError::NotActivated;
    assert!(format!("{err:?}").contains("NotActivated"));
}
