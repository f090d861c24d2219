//! Options of uploads, multipart uploads and groups.

use std::fmt;

use tokio_util::sync::CancellationToken;

use super::signature::Expiry;

/// Whether an uploaded file is stored permanently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Store {
    /// Follow the project setting.
    #[default]
    Auto,
    /// Store the file.
    Stored,
    /// Remove the file after 24 hours.
    NotStored,
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Auto => f.write_str("auto"),
            Store::Stored => f.write_str("1"),
            Store::NotStored => f.write_str("0"),
        }
    }
}

impl From<bool> for Store {
    fn from(v: bool) -> Self {
        if v {
            Store::Stored
        } else {
            Store::NotStored
        }
    }
}

/// Options of a single upload.
///
/// ```
/// use ucare_upload::{Store, Upload};
///
/// let upload = Upload::new("https://example.com/pic.png")
///     .with_store(Store::Stored)
///     .with_metadata("subsystem", "avatars")
///     .with_expire("2030-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Upload {
    /// Local path or remote url.
    pub input: String,
    /// Store flag, default to [`Store::Auto`].
    pub store: Store,
    /// Metadata attached to the file, sent as `metadata[<key>]`.
    pub metadata: Vec<(String, String)>,
    /// Expiry of the signature, required when a secret key is configured.
    pub expire: Option<Expiry>,
    /// Extra form fields, never override the fields set by the client.
    pub fields: Vec<(String, String)>,
    /// Stops waiting for a remote fetch when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl Upload {
    /// Create an upload of `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Set store
    pub fn with_store(mut self, store: impl Into<Store>) -> Self {
        self.store = store.into();
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Set expire
    pub fn with_expire(mut self, expire: impl Into<Expiry>) -> Self {
        self.expire = Some(expire.into());
        self
    }

    /// Add an extra form field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Set the cancellation token
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Options to start a multipart upload.
#[derive(Debug, Clone, Default)]
pub struct StartMultipart {
    /// Name of the file.
    pub filename: String,
    /// Size of the whole file in bytes.
    pub size: u64,
    /// Mime type, guessed from `filename` if unset.
    pub content_type: Option<String>,
    /// Expiry of the signature, required when a secret key is configured.
    pub expire: Option<Expiry>,
    /// Extra form fields, never override the fields set by the client.
    pub fields: Vec<(String, String)>,
}

impl StartMultipart {
    /// Start a multipart upload of `size` bytes named `filename`.
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
            ..Default::default()
        }
    }

    /// Set content_type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set expire
    pub fn with_expire(mut self, expire: impl Into<Expiry>) -> Self {
        self.expire = Some(expire.into());
        self
    }

    /// Add an extra form field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

/// Options to create a group of files.
#[derive(Debug, Clone, Default)]
pub struct CreateGroup {
    /// File ids or CDN urls, in group order.
    pub files: Vec<String>,
    /// Expiry of the signature, required when a secret key is configured.
    pub expire: Option<Expiry>,
    /// Extra form fields, never override the fields set by the client.
    pub fields: Vec<(String, String)>,
}

impl CreateGroup {
    /// Group `files`.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set expire
    pub fn with_expire(mut self, expire: impl Into<Expiry>) -> Self {
        self.expire = Some(expire.into());
        self
    }

    /// Add an extra form field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}
