//! Advisory client-side JWT payload decoding.
//!
//! The console decodes the bearer token's payload locally to recover a role
//! claim and the expiry instant for UI gating only. Signatures are NOT
//! verified here; the backend re-checks authorization on every write, so the
//! decoded claims are a hint, never a grant.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde_json::Value;
use thiserror::Error;

/// Claim keys scanned, in order, for the role value. Backends have shipped
/// the role under several names over time.
pub const ROLE_CLAIM_KEYS: [&str; 5] = ["rol", "role", "authorities", "scope", "permission"];

/// Failure to read a token's payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenDecodeError {
    /// The token header is not parseable JWT.
    #[error("token header is malformed: {0}")]
    MalformedHeader(String),
    /// The token payload could not be decoded.
    #[error("token payload is malformed: {0}")]
    MalformedPayload(String),
}

/// The subset of claims the console consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// `sub` claim, when present.
    pub subject: Option<String>,
    /// First string value found under [`ROLE_CLAIM_KEYS`], when any.
    pub role_claim: Option<String>,
    /// `exp` claim as an instant, when present.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Decode a token's payload without verifying its signature.
///
/// Expiry is *not* enforced here either; the session service owns that
/// decision against its injected clock.
///
/// # Errors
///
/// Returns a [`TokenDecodeError`] when the token is not structurally a JWT.
pub fn decode_unverified(token: &str) -> Result<TokenClaims, TokenDecodeError> {
    let header =
        decode_header(token).map_err(|err| TokenDecodeError::MalformedHeader(err.to_string()))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|err| TokenDecodeError::MalformedPayload(err.to_string()))?;
    Ok(claims_from_payload(&data.claims))
}

fn claims_from_payload(payload: &Value) -> TokenClaims {
    let subject = payload
        .get("sub")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let role_claim = ROLE_CLAIM_KEYS
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_owned);
    let expires_at = payload
        .get("exp")
        .and_then(Value::as_i64)
        .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single());
    TokenClaims {
        subject,
        role_claim,
        expires_at,
    }
}

#[cfg(test)]
mod tests;
