//! Core components for talking to the Uploadcare Upload API.
//!
//! This crate provides the foundational types and traits shared by the ucare
//! crates. It keeps every side effect behind a pluggable capability so the
//! upload logic can be driven by real clients in production and by mocks in
//! tests.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending,
//!   environment access and date parsing
//! - **Error**: A single error type whose [`ErrorKind`] separates configuration mistakes,
//!   input mistakes and remote failures
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use ucare_core::{Context, HttpSend, Result};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct AlwaysOk;
//!
//! #[async_trait]
//! impl HttpSend for AlwaysOk {
//!     async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(Bytes::from_static(b"{}")))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(AlwaysOk);
//!
//! let req = http::Request::get("https://upload.uploadcare.com/info/").body(Bytes::new())?;
//! let resp = ctx.http_send(req).await?;
//! assert!(resp.status().is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`FileRead`]: For asynchronous file reading
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`DateParse`]: For turning free-form date text into an instant
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::DateParse;
pub use context::EnglishDateParse;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
