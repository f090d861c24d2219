//! Form encoded request bodies.

use bytes::{BufMut, Bytes, BytesMut};
use log::warn;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Ordered list of form fields.
///
/// Every field set through [`FormFields::set`] is reserved: extra fields merged
/// later with [`FormFields::merge_extra`] can never replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing the previous value with the same name.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Flatten `metadata` into `metadata[<key>]` fields.
    pub fn set_metadata<'a>(&mut self, metadata: impl IntoIterator<Item = &'a (String, String)>) {
        for (k, v) in metadata {
            self.set(format!("metadata[{k}]"), v.as_str());
        }
    }

    /// Merge caller supplied fields verbatim.
    ///
    /// Fields colliding with an already present name are dropped.
    pub fn merge_extra<'a>(&mut self, extra: impl IntoIterator<Item = &'a (String, String)>) {
        for (k, v) in extra {
            if self.contains(k) {
                warn!("extra field {k} collides with a reserved field, ignored");
                continue;
            }
            self.fields.push((k.clone(), v.clone()));
        }
    }

    /// Get the value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Encode as `multipart/form-data` with `file` appended as the last part.
    ///
    /// Returns the `Content-Type` header value and the body.
    pub fn to_multipart(&self, file_field: &str, file: &FilePart) -> (String, Bytes) {
        let boundary = boundary();
        let mut buf = BytesMut::with_capacity(file.bytes.len() + 256 * (self.len() + 1));

        for (k, v) in self.iter() {
            buf.put_slice(format!("--{boundary}\r\n").as_bytes());
            buf.put_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    escape_quoted(k)
                )
                .as_bytes(),
            );
            buf.put_slice(v.as_bytes());
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(format!("--{boundary}\r\n").as_bytes());
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(file_field),
                escape_quoted(&file.filename)
            )
            .as_bytes(),
        );
        buf.put_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        buf.put_slice(&file.bytes);
        buf.put_slice(b"\r\n");
        buf.put_slice(format!("--{boundary}--\r\n").as_bytes());

        (
            format!("multipart/form-data; boundary={boundary}"),
            buf.freeze(),
        )
    }
}

/// A file attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// File name sent to the service.
    pub filename: String,
    /// Mime type of the content.
    pub content_type: String,
    /// File content.
    pub bytes: Bytes,
}

impl FilePart {
    /// Create a file part, guessing the content type from `filename`.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename);
        Self {
            filename,
            content_type,
            bytes: bytes.into(),
        }
    }
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Guess the mime type of `filename`, `application/octet-stream` if unknown.
pub fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("ucare-{suffix}")
}

// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(s: &str) -> String {
    s.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
