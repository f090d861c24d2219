//! Client for the Uploadcare Upload API with secure (signed) uploads.
//!
//! ## Secure uploads
//!
//! Once a secret key is configured every upload, multipart start and group
//! creation must carry an expiry. The client signs it with
//! HMAC-SHA256 and sends `expire` and `signature` along with the request, the
//! secret key itself never leaves the process.
//!
//! ## Example
//!
//! ```no_run
//! use ucare_core::Context;
//! use ucare_file_read_tokio::TokioFileRead;
//! use ucare_http_send_reqwest::ReqwestHttpSend;
//! use ucare_upload::{Client, Config, CreateGroup, Upload};
//!
//! # async fn example() -> ucare_core::Result<()> {
//! let ctx = Context::new()
//!     .with_file_read(TokioFileRead)
//!     .with_http_send(ReqwestHttpSend::default());
//! let client = Client::new(ctx, Config::new().with_public_key("demopublickey"))?;
//!
//! let a = client.upload(Upload::new("photo.jpg")).await?;
//! let b = client
//!     .upload(Upload::new("https://example.com/pic.png").with_metadata("source", "web"))
//!     .await?;
//! let group = client.create_group(CreateGroup::new([a, b])).await?;
//! println!("{group}");
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod form;
pub use form::{guess_content_type, FilePart, FormFields};

mod options;
pub use options::{CreateGroup, StartMultipart, Store, Upload};

mod outcome;
pub use outcome::{MultipartSession, UploadOutcome};

mod poll;
pub use poll::{FetchPoller, FetchStatus};

mod request;
pub use request::{Payload, RequestBuilder, UploadRequest};

mod response;
pub use response::ResponseValidator;

mod signature;
pub use signature::{build_secure_params, compute_signature, resolve_expiry};
pub use signature::{Expiry, SecureSignature};

mod target;
pub use target::UploadTarget;

mod constants;
