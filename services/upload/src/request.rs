//! Outbound requests of the Upload API.
//!
//! Every endpoint names the public key field its own way:
//!
//! | request                    | public key field     |
//! |----------------------------|----------------------|
//! | direct upload              | `UPLOADCARE_PUB_KEY` |
//! | url upload / status        | `pub_key`            |
//! | multipart start / complete | `UPLOADCARE_PUB_KEY` |
//! | group create               | `pub_key`            |
//! | info / group info          | `pub_key` (query)    |

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use log::debug;
use ucare_core::time::{self, DateTime};
use ucare_core::{Context, Result};

use super::constants::*;
use super::credential::Credential;
use super::form::{guess_content_type, FilePart, FormFields};
use super::options::{CreateGroup, StartMultipart, Upload};
use super::signature::{build_secure_params, Expiry};

/// What travels in the body of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Only form fields: query string for `GET`, url encoded body otherwise.
    Fields,
    /// Form fields plus a file, sent as `multipart/form-data`.
    File(FilePart),
    /// Raw bytes with their content type, form fields are not sent.
    Raw {
        /// Mime type of the bytes.
        content_type: String,
        /// Request body.
        bytes: Bytes,
    },
}

/// A fully described request, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute url.
    pub url: String,
    /// Form fields.
    pub fields: FormFields,
    /// Body kind.
    pub payload: Payload,
}

impl UploadRequest {
    fn new(method: Method, url: String, fields: FormFields) -> Self {
        Self {
            method,
            url,
            fields,
            payload: Payload::Fields,
        }
    }

    /// Encode into an http request.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let builder = http::Request::builder().method(self.method.clone());

        let req = match self.payload {
            Payload::Fields if self.method == Method::GET => {
                let uri = if self.fields.is_empty() {
                    self.url
                } else {
                    format!("{}?{}", self.url, self.fields.to_urlencoded())
                };
                builder.uri(uri).body(Bytes::new())?
            }
            Payload::Fields => builder
                .uri(self.url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Bytes::from(self.fields.to_urlencoded()))?,
            Payload::File(file) => {
                let (content_type, body) = self.fields.to_multipart(FIELD_FILE, &file);
                builder
                    .uri(self.url)
                    .header(CONTENT_TYPE, content_type)
                    .body(body)?
            }
            Payload::Raw {
                content_type,
                bytes,
            } => builder
                .uri(self.url)
                .header(CONTENT_TYPE, content_type)
                .body(bytes)?,
        };

        Ok(req)
    }
}

/// RequestBuilder turns upload options into [`UploadRequest`]s.
///
/// It never sends anything. When an expiry is given, the request is signed
/// with the secret key of the credential.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    ctx: &'a Context,
    credential: &'a Credential,
    upload_url: &'a str,
    time: Option<DateTime>,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder for the service at `upload_url`.
    pub fn new(ctx: &'a Context, credential: &'a Credential, upload_url: &'a str) -> Self {
        Self {
            ctx,
            credential,
            upload_url: upload_url.trim_end_matches('/'),
            time: None,
        }
    }

    /// Specify the time expiries are checked against.
    ///
    /// # Note
    ///
    /// We should always take current time to check expiries.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.upload_url)
    }

    fn sign(&self, fields: &mut FormFields, expire: Option<&Expiry>) -> Result<()> {
        let Some(expire) = expire else {
            return Ok(());
        };

        let now = self.time.unwrap_or_else(time::now);
        build_secure_params(
            self.ctx,
            self.credential.secret_key.as_deref(),
            expire,
            now,
        )?
        .apply(fields);
        Ok(())
    }

    /// `POST /base/` with the file content.
    pub fn direct_upload(&self, file: FilePart, opts: &Upload) -> Result<UploadRequest> {
        let mut fields = FormFields::new();
        fields.set(FIELD_UPLOADCARE_PUB_KEY, self.credential.public_key.as_str());
        fields.set(FIELD_STORE, opts.store.to_string());
        fields.set_metadata(&opts.metadata);
        self.sign(&mut fields, opts.expire.as_ref())?;
        // The file itself is sent in this field.
        fields.merge_extra(opts.fields.iter().filter(|(k, _)| k != FIELD_FILE));

        debug!("build direct upload of {}", file.filename);
        let mut req = UploadRequest::new(Method::POST, self.endpoint(ENDPOINT_BASE), fields);
        req.payload = Payload::File(file);
        Ok(req)
    }

    /// `POST /from_url/` asking the service to fetch `source_url`.
    pub fn url_upload(&self, source_url: &str, opts: &Upload) -> Result<UploadRequest> {
        let mut fields = FormFields::new();
        fields.set(FIELD_PUB_KEY, self.credential.public_key.as_str());
        fields.set(FIELD_STORE, opts.store.to_string());
        fields.set(FIELD_SOURCE_URL, source_url);
        fields.set_metadata(&opts.metadata);
        self.sign(&mut fields, opts.expire.as_ref())?;
        fields.merge_extra(&opts.fields);

        debug!("build url upload of {source_url}");
        Ok(UploadRequest::new(
            Method::POST,
            self.endpoint(ENDPOINT_FROM_URL),
            fields,
        ))
    }

    /// `POST /from_url/status/` for a pending fetch.
    pub fn fetch_status(&self, token: &str) -> UploadRequest {
        let mut fields = FormFields::new();
        fields.set(FIELD_TOKEN, token);

        UploadRequest::new(
            Method::POST,
            self.endpoint(ENDPOINT_FROM_URL_STATUS),
            fields,
        )
    }

    /// `POST /multipart/start/`.
    pub fn multipart_start(&self, opts: &StartMultipart) -> Result<UploadRequest> {
        let content_type = opts
            .content_type
            .clone()
            .unwrap_or_else(|| guess_content_type(&opts.filename));

        let mut fields = FormFields::new();
        fields.set(FIELD_UPLOADCARE_PUB_KEY, self.credential.public_key.as_str());
        fields.set(FIELD_FILENAME, opts.filename.as_str());
        fields.set(FIELD_SIZE, opts.size.to_string());
        fields.set(FIELD_CONTENT_TYPE, content_type);
        self.sign(&mut fields, opts.expire.as_ref())?;
        fields.merge_extra(&opts.fields);

        Ok(UploadRequest::new(
            Method::POST,
            self.endpoint(ENDPOINT_MULTIPART_START),
            fields,
        ))
    }

    /// `PUT` one part to its presigned url.
    ///
    /// Presigned urls are absolute and already authorized, the upload url is
    /// not involved.
    pub fn multipart_part(
        &self,
        presigned_url: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> UploadRequest {
        let mut req = UploadRequest::new(Method::PUT, presigned_url.to_string(), FormFields::new());
        req.payload = Payload::Raw {
            content_type: content_type.to_string(),
            bytes,
        };
        req
    }

    /// `POST /multipart/complete/`.
    pub fn multipart_complete(&self, uuid: &str) -> UploadRequest {
        let mut fields = FormFields::new();
        fields.set(FIELD_UPLOADCARE_PUB_KEY, self.credential.public_key.as_str());
        fields.set(FIELD_UUID, uuid);

        UploadRequest::new(
            Method::POST,
            self.endpoint(ENDPOINT_MULTIPART_COMPLETE),
            fields,
        )
    }

    /// `POST /group/` with indexed `files[n]` fields.
    pub fn group_create(&self, opts: &CreateGroup) -> Result<UploadRequest> {
        let mut fields = FormFields::new();
        fields.set(FIELD_PUB_KEY, self.credential.public_key.as_str());
        for (n, file) in opts.files.iter().enumerate() {
            fields.set(format!("files[{n}]"), file.as_str());
        }
        self.sign(&mut fields, opts.expire.as_ref())?;
        fields.merge_extra(&opts.fields);

        Ok(UploadRequest::new(
            Method::POST,
            self.endpoint(ENDPOINT_GROUP),
            fields,
        ))
    }

    /// `GET /info/`.
    pub fn info(&self, file_id: &str) -> UploadRequest {
        let mut fields = FormFields::new();
        fields.set(FIELD_FILE_ID, file_id);
        fields.set(FIELD_PUB_KEY, self.credential.public_key.as_str());

        UploadRequest::new(Method::GET, self.endpoint(ENDPOINT_INFO), fields)
    }

    /// `GET /group/info/`.
    pub fn group_info(&self, group_id: &str) -> UploadRequest {
        let mut fields = FormFields::new();
        fields.set(FIELD_PUB_KEY, self.credential.public_key.as_str());
        fields.set(FIELD_GROUP_ID, group_id);

        UploadRequest::new(Method::GET, self.endpoint(ENDPOINT_GROUP_INFO), fields)
    }
}
