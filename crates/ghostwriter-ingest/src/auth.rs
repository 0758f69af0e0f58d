//! Shared-secret authentication for inbound webhooks.
//!
//! Vapi sends the configured secret in the `x-vapi-secret` header. Header
//! name lookup is case-insensitive by contract (`HeaderMap` guarantees it);
//! the value comparison is byte-for-byte and constant-time.

use axum::http::HeaderMap;

use crate::error::IngestError;

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-vapi-secret";

/// Authenticates a request against the configured secret.
///
/// Fails when the header is absent, when the configured secret is empty, or
/// when the values differ. Nothing derived from the request besides the
/// header participates in the decision.
pub fn authenticate(headers: &HeaderMap, expected_secret: &str) -> Result<(), IngestError> {
    let provided = headers.get(SECRET_HEADER).map(|value| value.as_bytes());

    match provided {
        Some(token) if !expected_secret.is_empty() && timing_safe_eq(token, expected_secret.as_bytes()) => {
            Ok(())
        },
        _ => Err(IngestError::Unauthorized),
    }
}

/// Timing-safe byte comparison to prevent timing attacks.
///
/// Uses constant-time comparison to avoid leaking information about the
/// expected secret through timing analysis.
fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.iter().zip(b.iter()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
