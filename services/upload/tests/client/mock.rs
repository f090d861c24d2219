use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use ucare_core::{Context, Error, HttpSend, Result};
use ucare_file_read_tokio::TokioFileRead;
use ucare_upload::{Client, Config};

/// A request seen by [`MockHttpSend`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: http::Method,
    pub uri: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn path(&self) -> String {
        self.uri
            .parse::<http::Uri>()
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }

    /// Url encoded form fields of the body, or of the query for GET requests.
    pub fn form(&self) -> Vec<(String, String)> {
        let raw: Vec<u8> = if self.method == http::Method::GET {
            self.uri
                .split_once('?')
                .map(|(_, q)| q.as_bytes().to_vec())
                .unwrap_or_default()
        } else {
            self.body.to_vec()
        };
        form_urlencoded::parse(&raw).into_owned().collect()
    }

    pub fn field(&self, key: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// HttpSend that replays queued responses and records every request.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
        self
    }

    pub fn ok(self, body: serde_json::Value) -> Self {
        self.respond(StatusCode::OK, body.to_string())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            content_type: parts
                .headers
                .get(http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });

        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("no response queued"))?;
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))?)
    }
}

pub const UPLOAD_URL: &str = "https://upload.example.com";

pub fn init_client(http: &MockHttpSend, secret_key: Option<&str>) -> Client {
    init_client_with_interval(http, secret_key, Duration::from_millis(5))
}

pub fn init_client_with_interval(
    http: &MockHttpSend,
    secret_key: Option<&str>,
    poll_interval: Duration,
) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(http.clone());

    let mut config = Config::new()
        .with_public_key("demopublickey")
        .with_upload_url(UPLOAD_URL)
        .with_poll_interval(poll_interval);
    if let Some(secret_key) = secret_key {
        config = config.with_secret_key(secret_key);
    }

    Client::new(ctx, config).expect("client must be created")
}
