//! Client configuration.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use super::constants::*;
use ucare_core::{utils::Redact, Context};

/// Config carries all the configuration for the Uploadcare Upload API client.
#[derive(Clone)]
pub struct Config {
    /// `public_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPLOADCARE_PUBLIC_KEY`]
    pub public_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPLOADCARE_SECRET_KEY`]
    ///
    /// Once set, every upload, multipart start and group creation must carry
    /// an `expire` value and will be signed.
    pub secret_key: Option<String>,
    /// `upload_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPLOADCARE_UPLOAD_URL`]
    /// - default: `https://upload.uploadcare.com`
    pub upload_url: Option<String>,
    /// Base of the returned CDN urls, default to `https://ucarecdn.com`.
    pub cdn_url: Option<String>,
    /// Delay between two checks of a pending remote fetch, default to 500ms.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key: None,
            secret_key: None,
            upload_url: None,
            cdn_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set public_key
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set upload_url
    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = Some(upload_url.into());
        self
    }

    /// Set cdn_url
    pub fn with_cdn_url(mut self, cdn_url: impl Into<String>) -> Self {
        self.cdn_url = Some(cdn_url.into());
        self
    }

    /// Set poll_interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Load config from env.
    ///
    /// Values that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(UPLOADCARE_PUBLIC_KEY) {
            self.public_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_UPLOAD_URL) {
            self.upload_url.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &self.public_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("upload_url", &self.upload_url)
            .field("cdn_url", &self.cdn_url)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
