//! Turning Upload API responses into results.

use bytes::Bytes;
use log::debug;
use serde_json::Value;
use ucare_core::{Error, Result};

use super::constants::*;

/// ResponseValidator classifies responses of the Upload API.
#[derive(Debug, Clone, Copy)]
pub struct ResponseValidator {
    has_secret_key: bool,
}

impl ResponseValidator {
    /// Create a validator for a client with or without a secret key.
    pub fn new(has_secret_key: bool) -> Self {
        Self { has_secret_key }
    }

    /// Check the status of `resp` and return its body.
    ///
    /// - 2xx: the body is returned as is.
    /// - the body asks for a signature and no secret key is configured:
    ///   [`ucare_core::ErrorKind::MissingSecretKey`].
    /// - anything else: [`ucare_core::ErrorKind::Protocol`] carrying the body.
    pub fn check(&self, resp: http::Response<Bytes>) -> Result<Bytes> {
        let status = resp.status();
        let body = resp.into_body();
        if status.is_success() {
            return Ok(body);
        }

        let text = String::from_utf8_lossy(&body);
        debug!("upload api responded {status}: {text}");
        if !self.has_secret_key && text.contains(MISSING_SIGNATURE_MARKER) {
            return Err(Error::missing_secret_key());
        }
        Err(Error::protocol(text))
    }

    /// Check `resp` and parse its body as JSON.
    pub fn validate(&self, resp: http::Response<Bytes>) -> Result<Value> {
        let body = self.check(resp)?;
        serde_json::from_slice(&body).map_err(|e| {
            Error::unexpected(format!(
                "response is not valid json: {}",
                String::from_utf8_lossy(&body)
            ))
            .with_source(e)
        })
    }
}

/// Read a string field of a JSON payload.
pub(crate) fn str_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

/// Read a required string field, reporting the whole payload when it's missing.
pub(crate) fn required_str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str> {
    str_field(payload, key).ok_or_else(|| {
        Error::protocol(format!("response misses field `{key}`: {payload}"))
    })
}
