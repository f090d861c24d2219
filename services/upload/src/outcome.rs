use serde::{Deserialize, Serialize};

/// A file accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// File id.
    pub uuid: String,
    /// Original file name.
    pub filename: String,
}

impl UploadOutcome {
    /// Public url of the file under `cdn_url`, `https://ucarecdn.com/{uuid}/{filename}`.
    pub fn cdn_url(&self, cdn_url: &str) -> String {
        format!(
            "{}/{}/{}",
            cdn_url.trim_end_matches('/'),
            self.uuid,
            self.filename
        )
    }
}

/// A started multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartSession {
    /// Id of the file being assembled.
    pub uuid: String,
    /// Presigned urls, one per part, in upload order.
    pub parts: Vec<String>,
}
