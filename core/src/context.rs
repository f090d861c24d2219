// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::time::DateTime;
use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the capabilities used while uploading.
///
/// ## Important
///
/// Except for date parsing, ucare provides NO default implementations. Users MAY
/// configure components they need. Any unconfigured component will use a no-op
/// implementation that returns errors or empty values when called.
///
/// ## Example
///
/// ```
/// use ucare_core::{Context, OsEnv};
///
/// // Create a context with explicit implementations
/// let ctx = Context::new()
///     .with_env(OsEnv);  // Optionally configure environment implementation
/// ```
#[derive(Clone)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
    date: Arc<dyn DateParse>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("fs", &self.fs)
            .field("http", &self.http)
            .field("env", &self.env)
            .field("date", &self.date)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    ///
    /// File reading, HTTP sending and environment access use no-op
    /// implementations by default, date parsing uses [`EnglishDateParse`].
    /// Use the `with_*` methods to configure the components you need.
    ///
    /// ```
    /// use ucare_core::Context;
    ///
    /// let ctx = Context::new();
    /// // You can configure specific components as needed:
    /// // ctx.with_file_read(my_file_reader)
    /// //    .with_http_send(my_http_client)
    /// //    .with_env(my_env_provider);
    /// ```
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
            date: Arc::new(EnglishDateParse),
        }
    }

    /// Replace the file reader implementation.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the date parser implementation.
    pub fn with_date_parse(mut self, date: impl DateParse) -> Self {
        self.date = Arc::new(date);
        self
    }

    /// Read the file content entirely in `Vec<u8>`.
    #[inline]
    pub async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path).await
    }

    /// Check whether `path` points to an existing regular file.
    #[inline]
    pub async fn file_exists(&self, path: &str) -> Result<bool> {
        self.fs.file_exists(path).await
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Parse a free-form date or time expression relative to `now`.
    ///
    /// Returns `None` if the text is not understood.
    #[inline]
    pub fn date_parse(&self, text: &str, now: DateTime) -> Option<DateTime> {
        self.date.parse(text, now)
    }
}

/// FileRead is used to read local files that are going to be uploaded.
#[async_trait::async_trait]
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the file content entirely in `Vec<u8>`.
    async fn file_read(&self, path: &str) -> Result<Vec<u8>>;

    /// Check whether `path` points to an existing regular file.
    async fn file_exists(&self, path: &str) -> Result<bool>;
}

/// HttpSend is used to send http requests to the upload service.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Permits parameterizing environment access.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;
}

/// DateParse turns a textual date/time expression into an instant.
pub trait DateParse: Debug + Send + Sync + 'static {
    /// Parse `text` relative to `now`, returns `None` if it can't be understood.
    fn parse(&self, text: &str, now: DateTime) -> Option<DateTime>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// Lenient English date parser.
///
/// Tries, in order:
///
/// - RFC 3339: `2030-01-01T00:00:00Z`
/// - RFC 2822: `Tue, 1 Jan 2030 00:00:00 +0000`
/// - an offset from `now`: `in 2 hours`, `30 minutes`, `in 1 week`
/// - natural language via `chrono-english` (US dialect): `tomorrow 9am`,
///   `next friday`, `2030-01-01 12:00`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDateParse;

impl DateParse for EnglishDateParse {
    fn parse(&self, text: &str, now: DateTime) -> Option<DateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(t) = chrono::DateTime::parse_from_rfc3339(text) {
            return Some(t.with_timezone(&chrono::Utc));
        }
        if let Ok(t) = chrono::DateTime::parse_from_rfc2822(text) {
            return Some(t.with_timezone(&chrono::Utc));
        }
        if let Some(offset) = parse_offset(text) {
            return now.checked_add_signed(offset);
        }

        chrono_english::parse_date_string(text, now, chrono_english::Dialect::Us).ok()
    }
}

/// Parse `[in] <n> <unit>` where unit is seconds, minutes, hours, days or weeks.
fn parse_offset(text: &str) -> Option<chrono::TimeDelta> {
    let mut words = text.split_whitespace();
    let mut first = words.next()?;
    if first.eq_ignore_ascii_case("in") {
        first = words.next()?;
    }
    let n: i64 = first.parse().ok()?;
    let unit = words.next()?.to_ascii_lowercase();
    if words.next().is_some() {
        return None;
    }

    match unit.trim_end_matches('s') {
        "sec" | "second" => chrono::TimeDelta::try_seconds(n),
        "min" | "minute" => chrono::TimeDelta::try_minutes(n),
        "hr" | "hour" => chrono::TimeDelta::try_hours(n),
        "day" => chrono::TimeDelta::try_days(n),
        "week" => chrono::TimeDelta::try_weeks(n),
        _ => None,
    }
}

/// NoopFileRead is a no-op implementation that always returns an error.
///
/// This is used when no file reader is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

#[async_trait::async_trait]
impl FileRead for NoopFileRead {
    async fn file_read(&self, _path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected(
            "file reading not supported: no file reader configured",
        ))
    }

    async fn file_exists(&self, _path: &str) -> Result<bool> {
        Ok(false)
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}
