//! Slack request signature verification.
//!
//! See <https://api.slack.com/authentication/verifying-requests-from-slack>.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Requests whose timestamp is further than this from now are replays.
pub const MAX_CLOCK_SKEW_SECS: u64 = 300;

const VERSION: &str = "v0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing header {0}")]
    MissingHeader(&'static str),
    #[error("malformed request timestamp")]
    InvalidTimestamp,
    #[error("request timestamp outside the accepted window")]
    Stale,
    #[error("signature mismatch")]
    Mismatch,
    #[error("signing secret rejected by HMAC")]
    InvalidKey,
}

/// Computes the `X-Slack-Signature` value for `body` sent at `timestamp`.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> Result<String, SignatureError> {
    let mac = keyed(secret, timestamp, body)?;
    Ok(format!("{VERSION}={}", hex::encode(mac.finalize().into_bytes())))
}

/// Verifies a request against the current wall clock.
pub fn verify(secret: &str, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    verify_at(secret, headers, body, now)
}

/// Verifies a request as if received at `now` (seconds since the epoch).
pub fn verify_at(
    secret: &str,
    headers: &HeaderMap,
    body: &[u8],
    now: u64,
) -> Result<(), SignatureError> {
    let timestamp = header(headers, TIMESTAMP_HEADER)?;
    let signature = header(headers, SIGNATURE_HEADER)?;

    let sent: u64 = timestamp
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp)?;
    if now.abs_diff(sent) > MAX_CLOCK_SKEW_SECS {
        return Err(SignatureError::Stale);
    }

    let expected = signature
        .strip_prefix("v0=")
        .and_then(|h| hex::decode(h).ok())
        .ok_or(SignatureError::Mismatch)?;

    keyed(secret, timestamp, body)?
        .verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

fn keyed(secret: &str, timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .ok_or(SignatureError::MissingHeader(name))
}
