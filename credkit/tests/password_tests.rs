mod common;

use common::TEST_COST;
use credkit::password::hash_with_cost;
use credkit::PasswordError;
use credkit::PasswordHasher;
use credkit::PasswordRecord;

#[test]
fn test_verify_accepts_own_hash() {
    let hasher = PasswordHasher::new(TEST_COST).unwrap();

    for password in ["", "a", "correct horse battery staple", "pässwörd", "🔑🔑🔑"] {
        let record = hasher.hash(password).expect("Failed to hash password");
        assert!(
            hasher.verify(password, record.as_str()).unwrap(),
            "rejected {password:?}"
        );
    }
}

#[test]
fn test_verify_rejects_other_passwords() {
    let hasher = PasswordHasher::new(TEST_COST).unwrap();
    let record = hasher.hash("hunter2").unwrap();

    for other in ["hunter3", "Hunter2", "hunter2 ", ""] {
        assert!(!hasher.verify(other, record.as_str()).unwrap(), "accepted {other:?}");
    }
}

#[test]
fn test_record_format_is_standard_bcrypt() {
    let record = hash_with_cost("password", 5).unwrap();
    let text = record.as_str();

    assert!(text.starts_with("$2b$05$"));
    assert_eq!(text.len(), 60);
    assert_eq!(record.cost(), 5);

    // Stored text can be parsed back and verified by a fresh hasher
    let parsed: PasswordRecord = text.parse().expect("Failed to parse record");
    let hasher = PasswordHasher::new(TEST_COST).unwrap();
    assert!(hasher.verify("password", parsed.as_str()).unwrap());
}

#[test]
fn test_malformed_record_is_not_a_mismatch() {
    let hasher = PasswordHasher::new(TEST_COST).unwrap();

    let result = hasher.verify("password", "$2b$04$tooshort");
    assert!(matches!(result, Err(PasswordError::InvalidRecord(_))));
}
