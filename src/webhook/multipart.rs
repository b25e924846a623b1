//! Multipart request body construction.
//!
//! A webhook message travels as `multipart/form-data` with up to two parts:
//! an optional binary attachment named [`FILE_FIELD`], followed by the
//! JSON document named [`PAYLOAD_FIELD`]. Building a body performs no
//! network I/O; the only side effect is reading the attachment once.

use std::fmt::Write as _;
use std::path::Path;

use bytes::Bytes;
use rand::Rng;

use super::PayloadError;
use crate::message::MessagePayload;

/// Form field name of the JSON document.
pub const PAYLOAD_FIELD: &str = "payload_json";

/// Form field name of the attachment.
pub const FILE_FIELD: &str = "file";

/// Number of random bytes in a boundary (hex encoded to twice as many chars).
const BOUNDARY_BYTES: usize = 30;

/// A fully encoded multipart body and the content type describing it.
///
/// The boundary inside `content_type` always matches the framing of
/// `body`, so the two must travel together. The body is immutable and
/// cheap to clone; every delivery attempt sends the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    body: Bytes,
    content_type: String,
    boundary: String,
}

impl MultipartBody {
    /// The encoded body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// The `multipart/form-data; boundary=...` content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The boundary token used to frame the parts.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Length of the encoded body in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Encodes a message and an optional attachment as a multipart body.
///
/// An empty `file` path is treated the same as `None`. When a file is
/// given it is read in full and embedded under its base name; the handle
/// is closed before this function returns.
///
/// # Errors
///
/// - [`PayloadError::FileAccess`] if the attachment cannot be opened or read,
///   or its base name is not valid UTF-8
/// - [`PayloadError::Serialization`] if the payload cannot be encoded as JSON
///
/// # Example
///
/// ```
/// use discord_hook::message::MessagePayload;
/// use discord_hook::webhook::build_body;
///
/// let body = build_body(&MessagePayload::text("hi"), None).unwrap();
/// assert!(body.content_type().starts_with("multipart/form-data; boundary="));
/// ```
pub fn build_body(
    payload: &MessagePayload,
    file: Option<&Path>,
) -> Result<MultipartBody, PayloadError> {
    let mut writer = MultipartWriter::new(random_boundary());

    if let Some(path) = file.filter(|p| !p.as_os_str().is_empty()) {
        let file_access = |source| PayloadError::FileAccess {
            path: path.to_path_buf(),
            source,
        };
        let filename = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_str()
            .ok_or_else(|| {
                file_access(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file name is not valid UTF-8",
                ))
            })?;
        let data = std::fs::read(path).map_err(file_access)?;
        writer.file_part(FILE_FIELD, filename, &data);
    }

    let json = payload.to_json()?;
    writer.text_part(PAYLOAD_FIELD, &json);

    Ok(writer.finish())
}

/// Incremental `multipart/form-data` encoder.
struct MultipartWriter {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartWriter {
    const fn new(boundary: String) -> Self {
        Self {
            boundary,
            buf: Vec::new(),
        }
    }

    fn file_part(&mut self, name: &str, filename: &str, data: &[u8]) {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(name),
            escape_quotes(filename)
        );
        self.open_part(&[
            ("Content-Disposition", &disposition),
            ("Content-Type", "application/octet-stream"),
        ]);
        self.buf.extend_from_slice(data);
    }

    fn text_part(&mut self, name: &str, value: &str) {
        let disposition = format!("form-data; name=\"{}\"", escape_quotes(name));
        self.open_part(&[("Content-Disposition", &disposition)]);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Writes the delimiter and headers that precede a part's data.
    fn open_part(&mut self, headers: &[(&str, &str)]) {
        if !self.buf.is_empty() {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf.extend_from_slice(b"--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"\r\n");

        for (name, value) in headers {
            self.buf.extend_from_slice(name.as_bytes());
            self.buf.extend_from_slice(b": ");
            self.buf.extend_from_slice(value.as_bytes());
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf.extend_from_slice(b"\r\n");
    }

    fn finish(mut self) -> MultipartBody {
        self.buf.extend_from_slice(b"\r\n--");
        self.buf.extend_from_slice(self.boundary.as_bytes());
        self.buf.extend_from_slice(b"--\r\n");

        MultipartBody {
            body: Bytes::from(self.buf),
            content_type: format!("multipart/form-data; boundary={}", self.boundary),
            boundary: self.boundary,
        }
    }
}

fn random_boundary() -> String {
    let mut raw = [0u8; BOUNDARY_BYTES];
    rand::rng().fill(&mut raw[..]);

    raw.iter()
        .fold(String::with_capacity(BOUNDARY_BYTES * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
