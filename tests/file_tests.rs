//! tests/file_tests.rs
//! File decryption through the fetch seam: pass-through errors, budgets, integrity

mod common;

use common::*;
use passport_crypt::passport::FileCredentials;
use passport_crypt::{
    decrypt_file, decrypt_file_within, FetchError, PassportError, PassportFile,
};
use std::error::Error as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

const FILE_SECRET: [u8; 32] = [0x24; 32];

fn sealed_file(file_id: &str, payload: &[u8]) -> (PassportFile, FileCredentials, Vec<u8>) {
    let sealed = passport_crypt::encryptor::seal_secure_data(&FILE_SECRET, payload).unwrap();
    let file: PassportFile = serde_json::from_value(passport_file(file_id)).unwrap();
    let credentials = FileCredentials::new(FILE_SECRET.to_vec(), sealed.hash.to_vec());
    (file, credentials, sealed.data)
}

#[test]
fn decrypts_fetched_file() {
    let payload = b"\xff\xd8\xff\xe0 scan bytes".to_vec();
    let (file, credentials, encrypted) = sealed_file("scan", &payload);
    let fetcher = MapFetcher::new().with_file("scan", encrypted).shared();

    assert_eq!(decrypt_file(&file, &credentials, &fetcher).unwrap(), payload);
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn closures_are_fetchers() {
    let (file, credentials, encrypted) = sealed_file("scan", b"closure payload");
    let fetcher = Arc::new(move |file_id: &str, _budget: Duration| -> Result<Vec<u8>, FetchError> {
        assert_eq!(file_id, "scan");
        Ok(encrypted.clone())
    });
    assert_eq!(decrypt_file(&file, &credentials, &fetcher).unwrap(), b"closure payload");
}

#[test]
fn fetch_error_is_passed_through_as_source() {
    let (file, credentials, _) = sealed_file("missing", b"never fetched");
    let err = decrypt_file(&file, &credentials, &MapFetcher::new().shared()).unwrap_err();

    match &err {
        PassportError::Fetch { file_id, .. } => assert_eq!(file_id, "missing"),
        other => panic!("expected fetch error, got {other}"),
    }
    let source = err.source().expect("fetch error keeps its source");
    assert_eq!(source.to_string(), "no such file: missing");
}

#[test]
fn slow_fetch_is_timeout() {
    let (file, credentials, encrypted) = sealed_file("slow", b"late bytes");
    let fetcher = MapFetcher::new()
        .with_file("slow", encrypted)
        .with_delay(Duration::from_millis(60))
        .shared();

    let err = decrypt_file_within(&file, &credentials, &fetcher, Duration::from_millis(5)).unwrap_err();
    match err {
        PassportError::Timeout { file_id, budget } => {
            assert_eq!(file_id, "slow");
            assert_eq!(budget, Duration::from_millis(5));
        }
        other => panic!("expected timeout, got {other}"),
    }
}

#[test]
fn timeout_does_not_wait_for_a_blocking_fetcher() {
    let (file, credentials, encrypted) = sealed_file("stuck", b"never delivered");
    let fetcher = MapFetcher::new()
        .with_file("stuck", encrypted)
        .with_delay(Duration::from_secs(2))
        .shared();

    let started = Instant::now();
    let err = decrypt_file_within(&file, &credentials, &fetcher, Duration::from_millis(20)).unwrap_err();
    let took = started.elapsed();

    assert!(matches!(err, PassportError::Timeout { .. }), "{err}");
    assert!(took < Duration::from_millis(500), "took {took:?}");
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn panicking_fetcher_is_fetch_error() {
    let (file, credentials, _) = sealed_file("boom", b"unused");
    let fetcher = Arc::new(|_: &str, _: Duration| -> Result<Vec<u8>, FetchError> {
        panic!("download client crashed")
    });

    let err = decrypt_file(&file, &credentials, &fetcher).unwrap_err();
    assert!(matches!(err, PassportError::Fetch { .. }), "{err}");
}

#[test]
fn tampered_file_is_integrity_error() {
    let (file, credentials, mut encrypted) = sealed_file("scan", b"original scan");
    encrypted[5] ^= 0x10;
    let fetcher = MapFetcher::new().with_file("scan", encrypted).shared();

    let err = decrypt_file(&file, &credentials, &fetcher).unwrap_err();
    assert!(err.is_integrity(), "{err}");
}

#[test]
fn truncated_download_is_validation_error() {
    let (file, credentials, encrypted) = sealed_file("scan", b"original scan");
    let fetcher = MapFetcher::new().with_file("scan", encrypted[..encrypted.len() - 3].to_vec()).shared();

    let err = decrypt_file(&file, &credentials, &fetcher).unwrap_err();
    assert!(matches!(err, PassportError::Validation(_)), "{err}");
}

#[test]
fn file_credentials_from_another_file_fail_integrity() {
    let (file, _, encrypted) = sealed_file("a", b"first file");
    let (_, other_credentials, _) = sealed_file("b", b"second file");
    let fetcher = MapFetcher::new().with_file("a", encrypted).shared();

    let err = decrypt_file(&file, &other_credentials, &fetcher).unwrap_err();
    assert!(err.is_integrity(), "{err}");
}

#[test]
fn known_answer_files_decrypt() {
    init_tracing();
    let passport = vector_passport();
    let credentials = passport_crypt::decrypt_credentials(&bot_key(), &passport.credentials).unwrap();
    let fetcher = vector_fetcher().shared();

    let mut seen = 0;
    for element in &passport.data {
        let decrypted = passport_crypt::decrypt_element(element, &credentials).unwrap();
        for bound in &decrypted.files {
            let bytes = bound.decrypt(&fetcher, Duration::from_secs(5)).unwrap();
            assert_eq!(bytes, vector_plaintext(&bound.file.file_id), "{}", bound.file.file_id);
            seen += 1;
        }
    }
    assert_eq!(seen, 5);
    assert_eq!(fetcher.calls(), 5);
}
