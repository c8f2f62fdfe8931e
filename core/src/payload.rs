//! Request bodies: flat JSON objects or multipart forms carrying files.
//!
//! The executor picks the `content-type` header from the variant, so the
//! caller only decides which shape the backend operation expects.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Error;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    /// Serialize any `Serialize` value into a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| Error::Encode(e.to_string()))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }

    pub fn content_type(&self) -> String {
        match self {
            Payload::Json(_) => JSON_CONTENT_TYPE.to_string(),
            Payload::Multipart(form) => form.content_type(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        match self {
            Payload::Json(value) => {
                serde_json::to_vec(value).map_err(|e| Error::Encode(e.to_string()))
            }
            Payload::Multipart(form) => Ok(form.encode()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Payload::Multipart(form)
    }
}

/// A file to upload as one part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::Encode(format!("{}: {e}", path.display())))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
        Ok(Self::new(filename, content_type, bytes))
    }
}

#[derive(Debug, Clone)]
enum PartBody {
    Text(String),
    File(FileAttachment),
}

#[derive(Debug, Clone)]
struct Part {
    name: String,
    body: PartBody,
}

/// A `multipart/form-data` body (RFC 7578).
///
/// Parts are encoded in insertion order. The boundary is random per form.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("----backoffice-{}", Uuid::new_v4().simple()),
            parts: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            body: PartBody::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FileAttachment) -> Self {
        self.parts.push(Part {
            name: name.into(),
            body: PartBody::File(file),
        });
        self
    }

    /// Add a text part only when `value` is present.
    pub fn text_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    /// Add a file part only when `file` is present.
    pub fn file_opt(self, name: impl Into<String>, file: Option<FileAttachment>) -> Self {
        match file {
            Some(f) => self.file(name, f),
            None => self,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            let name = escape_quoted(&part.name);
            match &part.body {
                PartBody::Text(value) => {
                    let header = format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n");
                    out.extend_from_slice(header.as_bytes());
                    out.extend_from_slice(value.as_bytes());
                }
                PartBody::File(file) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_quoted(&file.filename),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(&file.bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

fn escape_quoted(s: &str) -> String {
    s.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_content_type() {
        let payload = Payload::json(&serde_json::json!({"name": "Panel"})).unwrap();
        assert_eq!(payload.content_type(), "application/json");
        assert!(!payload.is_multipart());
        assert_eq!(payload.encode().unwrap(), br#"{"name":"Panel"}"#.to_vec());
    }

    #[test]
    fn multipart_content_type_carries_boundary() {
        let form = MultipartForm::new().text("title", "Summer sale");
        let boundary = form.boundary().to_string();
        let payload = Payload::from(form);
        assert!(payload.is_multipart());
        assert_eq!(
            payload.content_type(),
            format!("multipart/form-data; boundary={boundary}")
        );
    }

    #[test]
    fn multipart_encoding_layout() {
        let form = MultipartForm::new()
            .text("name", "Inverter")
            .file("image", FileAttachment::new("a.png", "image/png", vec![1, 2, 3]));
        let b = form.boundary().to_string();
        let mut expected = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nInverter\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .into_bytes();
        expected.extend_from_slice(&[1, 2, 3]);
        expected.extend_from_slice(format!("\r\n--{b}--\r\n").as_bytes());
        assert_eq!(form.encode(), expected);
    }

    #[test]
    fn optional_parts_are_skipped() {
        let form = MultipartForm::new()
            .text_opt("link", None::<String>)
            .file_opt("image", None)
            .text("title", "t");
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn quotes_in_names_are_escaped() {
        let form = MultipartForm::new()
            .file("doc", FileAttachment::new("a\"b.pdf", "application/pdf", Vec::new()));
        let body = String::from_utf8(form.encode()).unwrap();
        assert!(body.contains("filename=\"a%22b.pdf\""));
    }

    #[test]
    fn attachment_from_path_reads_bytes_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();

        let sheet = dir.path().join("prices.xlsx");
        std::fs::write(&sheet, b"PK\x03\x04").unwrap();
        let file = FileAttachment::from_path(&sheet).unwrap();
        assert_eq!(file.filename, "prices.xlsx");
        assert_eq!(
            file.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(file.bytes, b"PK\x03\x04".to_vec());

        let logo = dir.path().join("logo.PNG");
        std::fs::write(&logo, [0x89, 0x50]).unwrap();
        assert_eq!(FileAttachment::from_path(&logo).unwrap().content_type, "image/png");

        let unknown = dir.path().join("README");
        std::fs::write(&unknown, "x").unwrap();
        assert_eq!(
            FileAttachment::from_path(&unknown).unwrap().content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn missing_file_is_an_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileAttachment::from_path(dir.path().join("gone.pdf")).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }
}
