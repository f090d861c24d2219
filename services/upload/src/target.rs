use std::path::Path;

use log::debug;
use ucare_core::{Context, Error, Result};

use super::form::FilePart;

/// Where the content of an upload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// A local file, already read into memory.
    LocalFile {
        /// Path given by the caller.
        path: String,
        /// The file to send, named after the base name of `path`.
        file: FilePart,
    },
    /// A remote url the service fetches by itself.
    RemoteUrl {
        /// Source url.
        url: String,
    },
}

impl UploadTarget {
    /// Classify `input` and load local content.
    ///
    /// An existing file always wins, otherwise `input` must look like an
    /// http(s) url.
    pub async fn resolve(ctx: &Context, input: &str) -> Result<Self> {
        if ctx.file_exists(input).await? {
            let filename = base_name(input)?;
            let bytes = ctx.file_read(input).await?;
            debug!("upload target {input} is a local file of {} bytes", bytes.len());

            return Ok(UploadTarget::LocalFile {
                path: input.to_string(),
                file: FilePart::new(filename, bytes),
            });
        }

        if input.starts_with("http") {
            debug!("upload target {input} is a remote url");
            return Ok(UploadTarget::RemoteUrl {
                url: input.to_string(),
            });
        }

        Err(Error::validation(format!(
            "input `{input}` is neither an existing file nor a valid url"
        )))
    }

    /// Whether the service has to fetch the content itself.
    pub fn is_url(&self) -> bool {
        matches!(self, UploadTarget::RemoteUrl { .. })
    }
}

fn base_name(path: &str) -> Result<String> {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| Error::validation(format!("input `{path}` has no file name")))
}
