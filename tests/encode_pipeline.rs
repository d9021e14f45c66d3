//! Integration tests: message → keyed CS8 capture → recovered plaintext

use seccw_lib::commands::encode::{run_encode, MessageMode};
use seccw_lib::commands::keys::{decrypt_text, keygen, KeyPaths};
use seccw_lib::cs8;
use seccw_lib::domain::{ModemConfig, ModulationKind, SecCwError};

fn keys_in(dir: &std::path::Path) -> KeyPaths {
    KeyPaths {
        public: dir.join("kyber_pk.b64"),
        private: dir.join("kyber_sk.b64"),
    }
}

/// Small timing keeps envelope-sized captures cheap
fn fast_config(modulation: ModulationKind) -> ModemConfig {
    let mut config = ModemConfig::default();
    config.modulation = modulation;
    config.timing.sample_rate = 8_000;
    config.timing.unit_seconds = 0.01;
    config
}

#[test]
fn test_plaintext_capture_matches_timing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("e.cs8");

    let report = run_encode(
        "E",
        MessageMode::Plaintext,
        &output,
        &ModemConfig::default(),
        &keys_in(dir.path()),
    )
    .unwrap();
    assert_eq!(report.total_units, 62);

    let capture = cs8::read_file(&output).unwrap();
    assert_eq!(capture.len(), 148_800);
    assert!(!capture.trailing_byte);
    assert!(capture.samples.iter().all(|s| s.im == 0.0));
}

#[test]
fn test_encrypted_capture_carries_a_decryptable_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let keys = keys_in(dir.path());
    keygen(&keys).unwrap();

    let report = run_encode(
        "CQ DE SECCW",
        MessageMode::Encrypt,
        &dir.path().join("secret.cs8"),
        &fast_config(ModulationKind::Am),
        &keys,
    )
    .unwrap();

    let plain = decrypt_text(&report.keyed_text, &keys.private).unwrap();
    assert_eq!(plain, b"CQ DE SECCW");
}

#[test]
fn test_cipher_b64_mode_keys_text_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let keys = keys_in(dir.path());
    keygen(&keys).unwrap();

    let first = run_encode(
        "73",
        MessageMode::Encrypt,
        &dir.path().join("a.cs8"),
        &fast_config(ModulationKind::Fm),
        &keys,
    )
    .unwrap();

    let second = run_encode(
        &first.keyed_text,
        MessageMode::CipherB64,
        &dir.path().join("b.cs8"),
        &fast_config(ModulationKind::Fm),
        &keys,
    )
    .unwrap();

    assert_eq!(second.keyed_text, first.keyed_text);
    assert_eq!(second.sample_count, first.sample_count);
    assert_eq!(decrypt_text(&second.keyed_text, &keys.private).unwrap(), b"73");
}

#[test]
fn test_wrong_private_key_fails_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let alice = keys_in(&dir.path().join("alice"));
    let bob = keys_in(&dir.path().join("bob"));
    std::fs::create_dir_all(dir.path().join("alice")).unwrap();
    std::fs::create_dir_all(dir.path().join("bob")).unwrap();
    keygen(&alice).unwrap();
    keygen(&bob).unwrap();

    let report = run_encode(
        "private",
        MessageMode::Encrypt,
        &dir.path().join("p.cs8"),
        &fast_config(ModulationKind::Am),
        &alice,
    )
    .unwrap();

    let err = decrypt_text(&report.keyed_text, &bob.private).unwrap_err();
    assert!(matches!(err, SecCwError::Authentication));
}
