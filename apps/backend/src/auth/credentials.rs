//! Extraction of the caller's access token from cookies or headers.
//!
//! The auth provider stores its session in a cookie named
//! `<prefix><project-ref><suffix>` whose value is a `base64-`-marked JSON
//! payload carrying the access token. A plain `Authorization: Bearer`
//! header is the fallback. Resolution never fails a request: any decode or
//! parse problem degrades to "no credential", and downstream routes decide
//! whether anonymous access is acceptable.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// Provider cookie name prefix.
pub const AUTH_COOKIE_PREFIX: &str = "sb-";
/// Provider cookie name suffix.
pub const AUTH_COOKIE_SUFFIX: &str = "-auth-token";
/// PKCE cookies match the prefix/suffix naively and must never be read as
/// a session.
const CODE_VERIFIER_MARKER: &str = "code-verifier";
/// Encoding marker on the cookie value.
const BASE64_MARKER: &str = "base64-";

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: Option<String>,
}

/// Resolve the access token for a request.
///
/// The auth cookie is checked first; the `Authorization` header is a pure
/// fallback. Returns `None` when no usable credential is present.
pub fn resolve_access_token(
    cookie_header: Option<&str>,
    authorization: Option<&str>,
) -> Option<String> {
    cookie_header
        .and_then(|raw| access_token_from_cookies(&parse_cookie_header(raw)))
        .or_else(|| authorization.and_then(bearer_from_authorization))
}

/// Parse a `Cookie` header into name/value pairs.
///
/// Splits on `;`, then on the first `=` per segment; values are
/// percent-decoded. Malformed segments are skipped.
pub fn parse_cookie_header(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|segment| {
            let (name, value) = segment.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim())
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.trim().to_string());
            Some((name.to_string(), value))
        })
        .collect()
}

/// Find the provider session cookie and extract its access token.
pub fn access_token_from_cookies(cookies: &[(String, String)]) -> Option<String> {
    cookies
        .iter()
        .find(|(name, _)| {
            name.starts_with(AUTH_COOKIE_PREFIX)
                && name.ends_with(AUTH_COOKIE_SUFFIX)
                && !name.contains(CODE_VERIFIER_MARKER)
        })
        .and_then(|(_, value)| access_token_from_session_value(value))
}

/// Decode a session cookie value into its access token.
///
/// Only values carrying the `base64-` marker are recognized; everything
/// else, and every decode/parse failure, yields `None`.
fn access_token_from_session_value(value: &str) -> Option<String> {
    let encoded = value.strip_prefix(BASE64_MARKER)?;
    let bytes = decode_base64_lenient(encoded)?;
    let payload: SessionPayload = serde_json::from_slice(&bytes).ok()?;
    payload.access_token.filter(|token| !token.is_empty())
}

/// Providers differ on alphabet and padding; accept the common variants.
fn decode_base64_lenient(encoded: &str) -> Option<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .or_else(|_| URL_SAFE_NO_PAD.decode(encoded.trim_end_matches('=')))
        .ok()
}

/// Parse an `Authorization` header value as a bearer token.
///
/// The scheme comparison is case-insensitive; an empty token counts as
/// absent.
pub fn bearer_from_authorization(header: &str) -> Option<String> {
    let (scheme, token) = header.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
