mod common;

use chrono::Duration;
use chrono::Utc;
use common::key_for;
use common::NOW;
use common::TEST_COST;
use credkit::AuthenticationError;
use credkit::Authenticator;
use credkit::Claims;
use credkit::Config;
use credkit::JwtError;
use credkit::TokenService;
use credkit::TOKEN_ALGORITHM;
use serde_json::json;

fn service(seed: u64) -> TokenService {
    TokenService::new(&key_for(TOKEN_ALGORITHM, seed)).expect("Failed to build token service")
}

fn replace_char(text: &str, index: usize) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[test]
fn test_future_expiry_returns_original_claims() {
    let service = service(1);
    let claims = Claims::expiring_at(NOW + 3600)
        .with_subject("user123")
        .with_issuer("credkit-tests")
        .with_extra("roles", json!(["reader", "writer"]))
        .with_extra("tenant", json!({ "id": 7, "name": "acme" }));

    let token = service.issue(&claims).expect("Failed to issue token");
    let decoded: Claims = service.validate_at(&token, NOW).expect("Failed to validate");

    assert_eq!(decoded, claims);
}

#[test]
fn test_past_expiry_fails() {
    let service = service(1);
    let token = service.issue(&Claims::expiring_at(NOW - 1)).unwrap();

    assert_eq!(
        service.validate_at::<Claims>(&token, NOW),
        Err(JwtError::TokenExpired)
    );
}

#[test]
fn test_wall_clock_validation() {
    let service = service(1);

    let live = service
        .issue(&Claims::for_subject("user123", Duration::minutes(5)).unwrap())
        .unwrap();
    let expired = service
        .issue(&Claims::expiring_at(Utc::now().timestamp() - 300))
        .unwrap();

    assert!(service.validate::<Claims>(&live).is_ok());
    assert_eq!(
        service.validate::<Claims>(&expired),
        Err(JwtError::TokenExpired)
    );
}

#[test]
fn test_any_signature_character_flip_is_detected() {
    let service = service(2);
    let token = service.issue(&Claims::expiring_at(NOW + 60)).unwrap();

    let signature_start = token.rfind('.').unwrap() + 1;
    for index in signature_start..token.len() {
        let tampered = replace_char(&token, index);
        assert_eq!(
            service.validate_at::<Claims>(&tampered, NOW),
            Err(JwtError::SignatureInvalid),
            "flip at {index} went undetected"
        );
    }
}

#[test]
fn test_payload_tampering_is_detected() {
    let service = service(2);
    let token = service
        .issue(&Claims::expiring_at(NOW + 60).with_extra("role", "reader"))
        .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    let forged_payload = {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;
        URL_SAFE_NO_PAD.encode(json!({ "exp": NOW + 60, "role": "admin" }).to_string())
    };
    let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

    assert_eq!(
        service.validate_at::<Claims>(&forged, NOW),
        Err(JwtError::SignatureInvalid)
    );
}

#[test]
fn test_token_from_other_key_is_rejected() {
    let token = service(3).issue(&Claims::expiring_at(NOW + 60)).unwrap();

    assert_eq!(
        service(4).validate_at::<Claims>(&token, NOW),
        Err(JwtError::SignatureInvalid)
    );
}

#[test]
fn test_errors_are_distinguishable() {
    let service = service(5);
    let expired = service.issue(&Claims::expiring_at(NOW - 60)).unwrap();
    let foreign = service_token_with_other_key();

    let expired_err = service.validate_at::<Claims>(&expired, NOW).unwrap_err();
    let foreign_err = service.validate_at::<Claims>(&foreign, NOW).unwrap_err();

    assert_ne!(expired_err, foreign_err);
    assert!(expired_err.to_string().contains("expired"));
    assert!(foreign_err.to_string().contains("signature"));
}

fn service_token_with_other_key() -> String {
    service(6).issue(&Claims::expiring_at(NOW + 60)).unwrap()
}

fn authenticator_with_ttl(ttl_minutes: i64) -> Result<Authenticator, AuthenticationError> {
    let config = Config::from_toml(&format!(
        "[token]\nttl_minutes = {ttl_minutes}\n\n[password]\ncost = {TEST_COST}"
    ))
    .expect("Failed to build config");
    Authenticator::from_config(&config)
}

#[test]
fn test_zero_lifetime_is_rejected() {
    assert!(matches!(
        authenticator_with_ttl(0),
        Err(AuthenticationError::InvalidTokenLifetime(0))
    ));
}

#[test]
fn test_negative_lifetime_is_rejected() {
    assert!(matches!(
        authenticator_with_ttl(-30),
        Err(AuthenticationError::InvalidTokenLifetime(-30))
    ));
}

#[test]
fn test_out_of_range_lifetime_is_rejected() {
    // Too large for a duration
    assert!(matches!(
        authenticator_with_ttl(i64::MAX),
        Err(AuthenticationError::InvalidTokenLifetime(i64::MAX))
    ));
    // Fits a duration but not the calendar
    assert!(matches!(
        authenticator_with_ttl(100_000_000_000_000),
        Err(AuthenticationError::InvalidTokenLifetime(100_000_000_000_000))
    ));
}

#[test]
fn test_configured_lifetime_issues_live_tokens() {
    let authenticator = authenticator_with_ttl(1).expect("Failed to build authenticator");

    let token = authenticator.issue_for("user123").expect("Failed to issue token");
    let decoded: Claims = authenticator
        .validate_token(&token)
        .expect("Failed to validate token");

    assert_eq!(decoded.exp - decoded.iat.expect("iat should be set"), 60);
}

#[test]
fn test_unrepresentable_expiry_is_an_error() {
    assert!(matches!(
        Claims::for_subject("user123", Duration::days(1_000_000_000)),
        Err(JwtError::InvalidLifetime(_))
    ));
}

#[test]
fn test_custom_field_cannot_replace_registered_claim() {
    let service = service(7);

    let shadowing_exp = Claims::expiring_at(NOW + 60).with_extra("exp", 1);
    let shadowing_sub = Claims::expiring_at(NOW + 60)
        .with_subject("user123")
        .with_extra("sub", "x");

    assert!(matches!(
        service.issue(&shadowing_exp),
        Err(JwtError::SigningFailed(_))
    ));
    assert!(matches!(
        service.issue(&shadowing_sub),
        Err(JwtError::SigningFailed(_))
    ));
}
