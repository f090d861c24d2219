//! Waiting for remote fetches.
//!
//! ```text
//! SUBMITTED -> PENDING -> ... -> PENDING -> SUCCESS
//!                                        \-> FAILED
//! ```

use std::time::Duration;

use log::debug;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use ucare_core::{Context, Error, Result};

use super::constants::*;
use super::outcome::UploadOutcome;
use super::request::RequestBuilder;
use super::response::{required_str_field, str_field, ResponseValidator};

/// State of a remote fetch as reported by `/from_url/status/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Still working, carries the reported status.
    Pending(String),
    /// Done.
    Success(UploadOutcome),
    /// The fetch failed for good.
    Failed,
}

impl FetchStatus {
    /// Read the status out of a status payload.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let status = required_str_field(payload, RESPONSE_STATUS)?;

        Ok(match status {
            STATUS_SUCCESS => FetchStatus::Success(UploadOutcome {
                filename: required_str_field(payload, RESPONSE_FILENAME)?.to_string(),
                uuid: required_str_field(payload, RESPONSE_UUID)?.to_string(),
            }),
            STATUS_ERROR | STATUS_UNKNOWN => FetchStatus::Failed,
            other => FetchStatus::Pending(other.to_string()),
        })
    }
}

/// FetchPoller polls a fetch token until the fetch succeeds or fails.
///
/// There is no attempt limit. Pass a [`CancellationToken`] or wrap the call in
/// `tokio::time::timeout` to bound the wait.
#[derive(Debug, Clone, Copy)]
pub struct FetchPoller {
    interval: Duration,
}

impl Default for FetchPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl FetchPoller {
    /// Create a poller waiting `interval` between two polls.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Poll `token` until it resolves.
    ///
    /// Polls run one after another, never concurrently.
    pub async fn poll(
        &self,
        ctx: &Context,
        builder: &RequestBuilder<'_>,
        validator: &ResponseValidator,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<UploadOutcome> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let req = builder.fetch_status(token).into_http()?;

            let resp = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(token)),
                resp = ctx.http_send(req) => resp?,
            };
            let body = validator.check(resp)?;
            let payload: Value = serde_json::from_slice(&body).map_err(|e| {
                Error::unexpected("status response is not valid json").with_source(e)
            })?;

            match FetchStatus::from_payload(&payload)? {
                FetchStatus::Success(outcome) => {
                    debug!("fetch {token} succeeded after {attempt} polls: {outcome:?}");
                    return Ok(outcome);
                }
                FetchStatus::Failed => {
                    debug!(
                        "fetch {token} failed with status {:?}",
                        str_field(&payload, RESPONSE_STATUS)
                    );
                    return Err(Error::protocol(String::from_utf8_lossy(&body)));
                }
                FetchStatus::Pending(status) => {
                    debug!("fetch {token} is {status}, poll again in {:?}", self.interval);
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(token)),
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

fn cancelled(token: &str) -> Error {
    Error::cancelled(format!("waiting for fetch {token} was cancelled"))
}
