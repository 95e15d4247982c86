//! Regression coverage for this module.

use jsonwebtoken::{EncodingKey, Header, encode};
use rstest::rstest;
use serde_json::{Value, json};

use super::{TokenDecodeError, decode_unverified};

fn mint(payload: &Value) -> String {
    encode(&Header::default(), payload, &EncodingKey::from_secret(b"test-key"))
        .expect("test token encodes")
}

#[rstest]
fn subject_role_and_expiry_are_extracted() {
    let token = mint(&json!({
        "sub": "a@b.com",
        "rol": "ROLE_ADMIN",
        "iat": 1_700_000_000,
        "exp": 1_700_003_600,
    }));
    let claims = decode_unverified(&token).expect("decodable token");
    assert_eq!(claims.subject.as_deref(), Some("a@b.com"));
    assert_eq!(claims.role_claim.as_deref(), Some("ROLE_ADMIN"));
    assert_eq!(
        claims.expires_at.map(|at| at.timestamp()),
        Some(1_700_003_600)
    );
}

#[rstest]
#[case(json!({ "role": "ROLE_ADMIN" }), Some("ROLE_ADMIN"))]
#[case(json!({ "authorities": "ROLE_USER" }), Some("ROLE_USER"))]
#[case(json!({ "scope": "ROLE_USER", "rol": "ROLE_ADMIN" }), Some("ROLE_ADMIN"))]
#[case(json!({ "sub": "x" }), None)]
#[case(json!({ "authorities": ["ROLE_ADMIN"] }), None)]
fn role_keys_are_scanned_in_declared_order(
    #[case] payload: Value,
    #[case] expected: Option<&str>,
) {
    let claims = decode_unverified(&mint(&payload)).expect("decodable token");
    assert_eq!(claims.role_claim.as_deref(), expected);
}

#[rstest]
fn tokens_without_expiry_still_decode() {
    let claims = decode_unverified(&mint(&json!({ "sub": "x" }))).expect("decodable token");
    assert!(claims.expires_at.is_none());
}

#[rstest]
#[case("not-a-token")]
#[case("")]
#[case("only.two")]
fn garbage_is_reported_not_swallowed(#[case] token: &str) {
    let err = decode_unverified(token).expect_err("garbage must not decode");
    assert!(matches!(
        err,
        TokenDecodeError::MalformedHeader(_) | TokenDecodeError::MalformedPayload(_)
    ));
}
