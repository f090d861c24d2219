//! Secure upload signatures.
//!
//! A secure upload carries two extra fields:
//!
//! ```text
//! expire    = unix timestamp (seconds) after which the signature is rejected
//! signature = hex(HMAC-SHA256(secret_key, decimal(expire)))
//! ```
//!
//! ## Reference
//!
//! - [Secure uploads](https://uploadcare.com/docs/security/secure-uploads/)

use std::time::SystemTime;

use log::debug;
use ucare_core::hash::hex_hmac_sha256;
use ucare_core::time::{self, DateTime};
use ucare_core::{Context, Error, Result};

use super::constants::*;
use super::form::FormFields;

/// Expiry is the point in time a secure upload stops being accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Expiry {
    /// Unix timestamp in seconds, fractions are allowed.
    Epoch(f64),
    /// An exact instant.
    At(DateTime),
    /// A date/time expression such as `2030-01-01T00:00:00Z` or `tomorrow 9am`.
    Text(String),
}

impl From<i64> for Expiry {
    fn from(v: i64) -> Self {
        Expiry::Epoch(v as f64)
    }
}

impl From<u64> for Expiry {
    fn from(v: u64) -> Self {
        Expiry::Epoch(v as f64)
    }
}

impl From<f64> for Expiry {
    fn from(v: f64) -> Self {
        Expiry::Epoch(v)
    }
}

impl From<&str> for Expiry {
    fn from(v: &str) -> Self {
        Expiry::Text(v.to_string())
    }
}

impl From<String> for Expiry {
    fn from(v: String) -> Self {
        Expiry::Text(v)
    }
}

impl From<DateTime> for Expiry {
    fn from(v: DateTime) -> Self {
        Expiry::At(v)
    }
}

impl From<SystemTime> for Expiry {
    fn from(v: SystemTime) -> Self {
        Expiry::At(time::from_system_time(v))
    }
}

/// The `expire` and `signature` pair attached to a secure upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureSignature {
    /// Unix timestamp in seconds.
    pub expire: i64,
    /// Lowercase hex encoded HMAC-SHA256.
    pub signature: String,
}

impl SecureSignature {
    /// Write `expire` and `signature` into the form.
    pub fn apply(&self, fields: &mut FormFields) {
        fields.set(FIELD_EXPIRE, self.expire.to_string());
        fields.set(FIELD_SIGNATURE, self.signature.clone());
    }
}

/// Compute the signature of a secure upload expiring at `expire`.
///
/// The key is used as raw bytes, text keys are taken as their UTF-8 bytes.
pub fn compute_signature(secret_key: impl AsRef<[u8]>, expire: i64) -> String {
    hex_hmac_sha256(secret_key.as_ref(), expire.to_string().as_bytes())
}

/// Resolve `raw` into a unix timestamp strictly after `now`, truncated to seconds.
pub fn resolve_expiry(ctx: &Context, raw: &Expiry, now: DateTime) -> Result<i64> {
    let at = match raw {
        Expiry::Epoch(secs) => time::from_timestamp_secs_f64(*secs).ok_or_else(|| {
            Error::validation(format!(
                "`expire` must be a finite unix timestamp, got {secs}"
            ))
        })?,
        Expiry::At(t) => *t,
        Expiry::Text(s) => ctx
            .date_parse(s, now)
            .ok_or_else(|| Error::invalid_datetime(s))?,
    };

    if at <= now {
        return Err(Error::validation(format!(
            "expire timestamp cannot be in the past: {at} is not after {now}"
        )));
    }

    Ok(at.timestamp())
}

/// Build the secure upload fields for `raw`.
///
/// Fails with [`ucare_core::ErrorKind::MissingSecretKey`] when no secret key
/// is available, before looking at `raw`.
pub fn build_secure_params(
    ctx: &Context,
    secret_key: Option<&str>,
    raw: &Expiry,
    now: DateTime,
) -> Result<SecureSignature> {
    let secret_key = secret_key.ok_or_else(Error::missing_secret_key)?;

    let expire = resolve_expiry(ctx, raw, now)?;
    debug!("signing secure upload expiring at {expire}");

    Ok(SecureSignature {
        expire,
        signature: compute_signature(secret_key, expire),
    })
}
