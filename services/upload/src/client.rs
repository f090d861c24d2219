//! The Upload API client.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use ucare_core::{Context, Error, Result};

use super::config::Config;
use super::constants::*;
use super::credential::Credential;
use super::options::{CreateGroup, StartMultipart, Upload};
use super::outcome::{MultipartSession, UploadOutcome};
use super::poll::FetchPoller;
use super::request::{RequestBuilder, UploadRequest};
use super::response::{required_str_field, str_field, ResponseValidator};
use super::signature::Expiry;
use super::target::UploadTarget;

/// Client for the Uploadcare Upload API.
///
/// The client is immutable once built and cheap to clone, share it freely
/// between tasks.
///
/// ```no_run
/// use ucare_core::Context;
/// use ucare_file_read_tokio::TokioFileRead;
/// use ucare_http_send_reqwest::ReqwestHttpSend;
/// use ucare_upload::{Client, Config, Upload};
///
/// # async fn example() -> ucare_core::Result<()> {
/// let ctx = Context::new()
///     .with_file_read(TokioFileRead)
///     .with_http_send(ReqwestHttpSend::default());
/// let client = Client::new(
///     ctx,
///     Config::new()
///         .with_public_key("demopublickey")
///         .with_secret_key("demosecretkey"),
/// )?;
///
/// let url = client
///     .upload(Upload::new("photo.jpg").with_expire("tomorrow"))
///     .await?;
/// println!("uploaded to {url}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    credential: Credential,
    upload_url: String,
    cdn_url: String,
    poll_interval: Duration,
}

impl Client {
    /// Create a client, `config` must carry a public key.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let public_key = config
            .public_key
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::validation("public key is required"))?;
        // An empty secret behaves like no secret at all.
        let secret_key = config.secret_key.filter(|v| !v.is_empty());

        let inner = Inner {
            credential: Credential::new(public_key, secret_key),
            upload_url: config
                .upload_url
                .unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string()),
            cdn_url: config.cdn_url.unwrap_or_else(|| DEFAULT_CDN_URL.to_string()),
            poll_interval: config.poll_interval,
        };
        debug!("create upload client: {inner:?}");

        Ok(Self {
            ctx,
            inner: Arc::new(inner),
        })
    }

    /// The credential used by this client.
    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(
            &self.ctx,
            &self.inner.credential,
            &self.inner.upload_url,
        )
    }

    fn validator(&self) -> ResponseValidator {
        ResponseValidator::new(self.inner.credential.is_secure())
    }

    /// Secure uploads can't be sent without an expiry.
    fn ensure_expire(&self, expire: Option<&Expiry>) -> Result<()> {
        if self.inner.credential.is_secure() && expire.is_none() {
            return Err(Error::missing_expire());
        }
        Ok(())
    }

    async fn send(&self, req: UploadRequest) -> Result<http::Response<Bytes>> {
        debug!("send {} {}", req.method, req.url);
        self.ctx.http_send(req.into_http()?).await
    }

    async fn send_json(&self, req: UploadRequest) -> Result<Value> {
        let resp = self.send(req).await?;
        self.validator().validate(resp)
    }

    /// Upload a local file or a remote url, returns its CDN url.
    pub async fn upload(&self, opts: Upload) -> Result<String> {
        let outcome = self.upload_outcome(opts).await?;
        Ok(outcome.cdn_url(&self.inner.cdn_url))
    }

    /// Upload a local file or a remote url, returns the uploaded file.
    pub async fn upload_outcome(&self, opts: Upload) -> Result<UploadOutcome> {
        self.ensure_expire(opts.expire.as_ref())?;

        let target = UploadTarget::resolve(&self.ctx, &opts.input).await?;
        let builder = self.builder();

        match target {
            UploadTarget::LocalFile { file, .. } => {
                let filename = file.filename.clone();
                let payload = self.send_json(builder.direct_upload(file, &opts)?).await?;

                Ok(UploadOutcome {
                    uuid: required_str_field(&payload, RESPONSE_FILE)?.to_string(),
                    filename,
                })
            }
            UploadTarget::RemoteUrl { url } => {
                let payload = self.send_json(builder.url_upload(&url, &opts)?).await?;

                if let Some(token) = str_field(&payload, RESPONSE_TOKEN) {
                    debug!("fetch of {url} accepted with token {token}");
                    let cancel = opts.cancel.clone().unwrap_or_default();
                    return FetchPoller::new(self.inner.poll_interval)
                        .poll(&self.ctx, &builder, &self.validator(), token, &cancel)
                        .await;
                }

                Ok(UploadOutcome {
                    filename: required_str_field(&payload, RESPONSE_FILENAME)?.to_string(),
                    uuid: required_str_field(&payload, RESPONSE_UUID)?.to_string(),
                })
            }
        }
    }

    /// Wait for a remote fetch started elsewhere.
    pub async fn check_status(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<UploadOutcome> {
        FetchPoller::new(self.inner.poll_interval)
            .poll(&self.ctx, &self.builder(), &self.validator(), token, cancel)
            .await
    }

    /// Get information about a file, `id_or_url` is a file id or a CDN url.
    pub async fn info(&self, id_or_url: &str) -> Result<Value> {
        let file_id = file_id_from(id_or_url)?;
        self.send_json(self.builder().info(&file_id)).await
    }

    /// Same as [`Client::info`], pretty printed with four spaces.
    pub async fn info_pretty(&self, id_or_url: &str) -> Result<String> {
        let info = self.info(id_or_url).await?;
        to_pretty_json(&info)
    }

    /// Start a multipart upload.
    pub async fn start_multipart(&self, opts: StartMultipart) -> Result<MultipartSession> {
        self.ensure_expire(opts.expire.as_ref())?;

        let payload = self.send_json(self.builder().multipart_start(&opts)?).await?;
        serde_json::from_value(payload.clone()).map_err(|e| {
            Error::protocol(format!("unexpected multipart start response: {payload}"))
                .with_source(e)
        })
    }

    /// Upload one part of a multipart upload to its presigned url.
    pub async fn upload_part(
        &self,
        presigned_url: &str,
        bytes: impl Into<Bytes>,
        content_type: &str,
    ) -> Result<()> {
        let req = self
            .builder()
            .multipart_part(presigned_url, bytes.into(), content_type);
        let resp = self.send(req).await?;
        self.validator().check(resp)?;
        Ok(())
    }

    /// Finish a multipart upload once every part is uploaded.
    pub async fn complete_multipart(&self, uuid: &str) -> Result<Value> {
        self.send_json(self.builder().multipart_complete(uuid)).await
    }

    /// Create a group of files.
    pub async fn create_group(&self, opts: CreateGroup) -> Result<Value> {
        self.ensure_expire(opts.expire.as_ref())?;

        self.send_json(self.builder().group_create(&opts)?).await
    }

    /// Get information about a group.
    pub async fn group_info(&self, group_id: &str) -> Result<Value> {
        self.send_json(self.builder().group_info(group_id)).await
    }
}

/// Extract the file id from a CDN url such as `https://ucarecdn.com/{uuid}/{filename}`.
///
/// Input not starting with `http` is taken as the id itself.
fn file_id_from(id_or_url: &str) -> Result<String> {
    if !id_or_url.starts_with("http") {
        return Ok(id_or_url.to_string());
    }

    let uri: http::Uri = id_or_url.parse()?;
    uri.path()
        .split('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::validation(format!("no file id found in `{id_or_url}`")))
}

fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| Error::unexpected("failed to format json").with_source(e))?;
    String::from_utf8(buf).map_err(|e| Error::unexpected("json is not utf-8").with_source(e))
}
