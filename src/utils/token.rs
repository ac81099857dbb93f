//! Local decoding of session token claims.
//!
//! The payload segment of the issued token is decoded WITHOUT verifying its
//! signature. The resulting admin flag only decides which affordances the
//! client shows and which actions it pre-flights; the server re-checks every
//! call, so nothing here is a security boundary.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};

use crate::error::ClientError;
use crate::models::TokenClaims;

/// Decode the claims embedded in a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClientError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| malformed("token has no payload segment"))?;

    // Issuers pad inconsistently and some use the standard alphabet
    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| malformed(&format!("payload is not base64: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| malformed(&format!("payload is not JSON: {e}")))
}

fn malformed(reason: &str) -> ClientError {
    ClientError::Auth(format!("Malformed session token: {reason}"))
}
