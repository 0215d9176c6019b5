//! Tenant identity derivation.
//!
//! The resolver turns the raw `Authorization` header value into the key
//! that partitions storage. It is deliberately permissive and does not
//! verify anything: a JWT-shaped credential has its payload decoded
//! without any signature check, everything else is taken verbatim. Two
//! tokens naming the same subject land on the same ledger.
use base64::Engine as _;

use crate::{EngineError, ResultEngine};

/// Derives the tenant key from the raw `Authorization` header value.
///
/// An optional `Bearer ` prefix is stripped. A credential with at least
/// two dot-separated segments is treated as a JWT: its second segment is
/// base64url-decoded and parsed as JSON, and the `sub` claim wins, then
/// `email`. Whenever that fails, the whole credential string is the key.
///
/// Fails with [`EngineError::AuthRequired`] only when no credential is
/// supplied at all.
pub fn resolve_identity(header_value: &str) -> ResultEngine<String> {
    let trimmed = header_value.trim();
    // Strip the scheme word only when it stands alone, so an opaque
    // credential that merely starts with "Bearer" stays intact.
    let credential = match trimmed.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => trimmed,
    };

    if credential.is_empty() {
        return Err(EngineError::AuthRequired);
    }

    match claimed_identity(credential) {
        Some(identity) => Ok(identity),
        None => Ok(credential.to_string()),
    }
}

/// Best-effort extraction of `sub` or `email` from a JWT-shaped credential.
fn claimed_identity(credential: &str) -> Option<String> {
    let mut segments = credential.split('.');
    segments.next()?;
    let payload = decode_segment(segments.next()?)?;
    let claims: serde_json::Value = serde_json::from_slice(&payload).ok()?;

    for claim in ["sub", "email"] {
        if let Some(value) = claims.get(claim).and_then(|claim| claim.as_str())
            && !value.is_empty()
        {
            return Some(value.to_string());
        }
    }

    None
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    // Tokens in the wild carry the payload both padded and unpadded.
    let unpadded = segment.trim_end_matches('=');
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(unpadded.as_bytes())
        .ok()
}
