//! Integration tests for the SecurePass vault module.

use std::fs;

use chrono::NaiveDateTime;
use securepass::crypto::DerivedKey;
use securepass::errors::SecurePassError;
use securepass::storage::{Backend, MemoryBackend, ReadTx, SqliteBackend, WriteTx};
use securepass::vault::entry::TIMESTAMP_FORMAT;
use securepass::vault::expiry::check_expiry_at;
use securepass::vault::master::{self, MASTER_RECORD_LEN};
use securepass::vault::{CredentialStore, MasterRecord, VaultSession};
use tempfile::TempDir;

/// Helper: master record and database paths inside a fresh temp dir.
fn vault_paths() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let master = dir.path().join("master.key");
    let db = dir.path().join("securepass.db");
    (dir, master, db)
}

fn at(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap()
}

// ---------------------------------------------------------------------------
// Master record: setup and login
// ---------------------------------------------------------------------------

#[test]
fn setup_writes_64_byte_record() {
    let (_dir, master_path, _) = vault_paths();

    assert!(!master::is_initialized(&master_path));
    master::setup(&master_path, b"correct-horse", b"correct-horse").expect("setup");
    assert!(master::is_initialized(&master_path));

    let raw = fs::read(&master_path).unwrap();
    assert_eq!(raw.len(), MASTER_RECORD_LEN);
    assert_eq!(MASTER_RECORD_LEN, 64);
}

#[test]
fn setup_rejects_mismatched_confirmation() {
    let (_dir, master_path, _) = vault_paths();

    let err = master::setup(&master_path, b"one", b"two").unwrap_err();
    assert!(matches!(err, SecurePassError::PasswordMismatch));
    assert!(!master_path.exists(), "nothing is written on mismatch");
}

#[test]
fn setup_never_overwrites_existing_record() {
    let (_dir, master_path, _) = vault_paths();

    master::setup(&master_path, b"first", b"first").unwrap();
    let before = fs::read(&master_path).unwrap();

    master::setup(&master_path, b"second", b"second").unwrap();
    let after = fs::read(&master_path).unwrap();

    assert_eq!(before, after);
    assert!(master::unlock(&master_path, b"first").is_ok());
    assert!(master::unlock(&master_path, b"second").is_err());
}

#[test]
fn two_setups_use_different_salts() {
    let a = MasterRecord::create(b"same").unwrap();
    let b = MasterRecord::create(b"same").unwrap();
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a.to_bytes(), b.to_bytes());
}

#[test]
fn verify_accepts_right_secret_and_rejects_wrong_one() {
    let record = MasterRecord::create(b"correct-horse").unwrap();

    let key = master::verify(b"correct-horse", &record).expect("correct secret");
    assert_eq!(key.as_bytes().len(), 32);

    let err = master::verify(b"wrong-horse", &record).unwrap_err();
    assert!(matches!(err, SecurePassError::AuthenticationFailed));
}

#[test]
fn key_is_stable_across_logins() {
    let (_dir, master_path, _) = vault_paths();
    master::setup(&master_path, b"pw", b"pw").unwrap();

    let k1 = master::unlock(&master_path, b"pw").unwrap();
    let k2 = master::unlock(&master_path, b"pw").unwrap();
    assert_eq!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn unlock_without_record_is_not_found() {
    let (_dir, master_path, _) = vault_paths();
    let err = master::unlock(&master_path, b"pw").unwrap_err();
    assert!(matches!(err, SecurePassError::MasterRecordNotFound(_)));
}

#[test]
fn truncated_record_is_rejected() {
    let (_dir, master_path, _) = vault_paths();
    fs::write(&master_path, [0u8; 40]).unwrap();

    let err = master::unlock(&master_path, b"pw").unwrap_err();
    assert!(matches!(err, SecurePassError::InvalidMasterRecord(_)));
}

// ---------------------------------------------------------------------------
// End-to-end session on SQLite
// ---------------------------------------------------------------------------

#[test]
fn save_twice_then_read_history() {
    let (_dir, master_path, db) = vault_paths();
    master::setup(&master_path, b"correct-horse", b"correct-horse").unwrap();

    let session =
        VaultSession::unlock(&master_path, b"correct-horse", SqliteBackend::new(&db)).unwrap();
    session.save("example.com", "alice", "p@ss1", 30).unwrap();
    session.save("example.com", "alice", "p@ss2", 0).unwrap();

    // A fresh session over the same files sees both entries.
    let reopened =
        VaultSession::unlock(&master_path, b"correct-horse", SqliteBackend::new(&db)).unwrap();
    let history = reopened.history("example.com", "alice").unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].password, "p@ss1");
    assert_eq!(history[0].expiry_days, 30);
    assert_eq!(history[1].password, "p@ss2");
    assert_eq!(history[1].expiry_days, 90, "non-positive expiry uses the default");

    let latest = reopened.latest("example.com", "alice").unwrap().unwrap();
    assert_eq!(latest.password, "p@ss2");

    let status = reopened.check_expiry(&latest);
    assert!(!status.is_expiring);
    assert!((89..=90).contains(&status.days_remaining));
}

#[test]
fn wrong_master_password_cannot_open_session() {
    let (_dir, master_path, db) = vault_paths();
    master::setup(&master_path, b"correct-horse", b"correct-horse").unwrap();

    let result = VaultSession::unlock(&master_path, b"battery-staple", SqliteBackend::new(&db));
    assert!(matches!(result, Err(SecurePassError::AuthenticationFailed)));
}

#[test]
fn unknown_identity_has_empty_history() {
    let (_dir, master_path, db) = vault_paths();
    master::setup(&master_path, b"pw", b"pw").unwrap();
    let session = VaultSession::unlock(&master_path, b"pw", SqliteBackend::new(&db)).unwrap();

    assert!(session.history("nowhere", "nobody").unwrap().is_empty());
    assert!(session.latest("nowhere", "nobody").unwrap().is_none());
}

#[test]
fn stored_values_are_not_plaintext() {
    let (_dir, master_path, db) = vault_paths();
    master::setup(&master_path, b"pw", b"pw").unwrap();
    let session = VaultSession::unlock(&master_path, b"pw", SqliteBackend::new(&db)).unwrap();

    session
        .save("bank.example", "carol", "very-secret-value", 30)
        .unwrap();

    let raw = SqliteBackend::new(&db)
        .view(|tx| tx.get("bank.example:carol"))
        .unwrap()
        .expect("history stored under website:account");
    assert!(!raw.contains("very-secret-value"));

    let fields: Vec<&str> = raw.split(" | ").collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[2], "30");
}

// ---------------------------------------------------------------------------
// Corruption and foreign keys
// ---------------------------------------------------------------------------

#[test]
fn corrupted_lines_are_skipped() {
    let key = DerivedKey::new([9u8; 32]);
    let store = CredentialStore::new(MemoryBackend::new());
    store.save("site", "dave", "good-1", &key, 30).unwrap();

    // Append a garbage line and a line encrypted under another key.
    let other = CredentialStore::new(MemoryBackend::new());
    other
        .save("site", "dave", "foreign", &DerivedKey::new([8u8; 32]), 30)
        .unwrap();
    let foreign = other
        .backend()
        .view(|tx| tx.get("site:dave"))
        .unwrap()
        .unwrap();

    store
        .backend()
        .update(|tx| {
            let existing = tx.get("site:dave")?.unwrap_or_default();
            let blob = format!("{existing}\nnot a valid line\n{foreign}");
            tx.set("site:dave", &blob)
        })
        .unwrap();

    store.save("site", "dave", "good-2", &key, 30).unwrap();

    let history = store.history("site", "dave", &key).unwrap();
    let values: Vec<_> = history.iter().map(|e| e.password.as_str()).collect();
    assert_eq!(values, vec!["good-1", "good-2"]);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_matches_website_or_account_case_insensitively() {
    let key = DerivedKey::new([3u8; 32]);
    let store = CredentialStore::new(MemoryBackend::new());

    store.save("GitHub.com", "alice", "a1", &key, 30).unwrap();
    store.save("gitlab.com", "bob", "b1", &key, 30).unwrap();
    store.save("example.com", "GITTE", "c1", &key, 30).unwrap();
    store.save("example.org", "erin", "d1", &key, 30).unwrap();
    store.save("gitlab.com", "bob", "b2", &key, 30).unwrap();

    let results = store.search("git", &key).unwrap();
    let hits: Vec<_> = results
        .iter()
        .map(|r| (r.website.as_str(), r.account.as_str(), r.entry.password.as_str()))
        .collect();

    // Ascending key order; each hit reports the newest entry.
    assert_eq!(
        hits,
        vec![
            ("GitHub.com", "alice", "a1"),
            ("example.com", "GITTE", "c1"),
            ("gitlab.com", "bob", "b2"),
        ]
    );
}

#[test]
fn search_without_matches_is_empty() {
    let key = DerivedKey::new([4u8; 32]);
    let store = CredentialStore::new(MemoryBackend::new());
    store.save("example.com", "alice", "x", &key, 30).unwrap();

    assert!(store.search("nomatch", &key).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[test]
fn expiry_is_calendar_days_from_save_time() {
    let key = DerivedKey::new([5u8; 32]);
    let store = CredentialStore::new(MemoryBackend::new());
    store
        .save_at("example.com", "alice", "pw", &key, 30, at("2024-01-01 12:00:00"))
        .unwrap();

    let entry = store.latest("example.com", "alice", &key).unwrap().unwrap();
    assert_eq!(entry.timestamp, "2024-01-01 12:00:00");

    let fresh = check_expiry_at(&entry.timestamp, entry.expiry_days, at("2024-01-01 12:00:00"));
    assert_eq!(fresh.days_remaining, 30);
    assert!(!fresh.is_expiring);

    let boundary = check_expiry_at(&entry.timestamp, entry.expiry_days, at("2024-01-24 12:00:00"));
    assert_eq!(boundary.days_remaining, 7);
    assert!(boundary.is_expiring);

    let expired = check_expiry_at(&entry.timestamp, entry.expiry_days, at("2024-02-05 12:00:00"));
    assert_eq!(expired.days_remaining, -5);
    assert!(expired.is_expiring);
    assert!(expired.is_expired());
}

#[test]
fn unparsable_timestamp_is_not_expiring() {
    let status = check_expiry_at("yesterday-ish", 30, at("2024-01-01 00:00:00"));
    assert!(!status.is_expiring);
    assert_eq!(status.days_remaining, 0);
}
