//! Request body encoding.
//!
//! # Design
//! Form-urlencoded and multipart bodies only carry strings, so every field
//! value goes through `coerce` first: strings pass through untouched and any
//! other JSON value is sent as its compact JSON text. The same rule applies to
//! both encodings.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::http::Headers;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The single body selected for a request. See `RequestSpec::body_kind`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind<'a> {
    Form(&'a Map<String, Value>),
    Json(&'a Value),
    Data(&'a Map<String, Value>),
    Raw(&'a [u8]),
}

/// String form of a field value.
///
/// Strings are returned unchanged; null, booleans, numbers, arrays and
/// objects become their JSON serialization.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Coerce every value of `fields`, keeping the field order.
pub fn coerce_fields(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fields.iter().map(|(name, value)| (name.clone(), coerce(value))).collect()
}

pub fn urlencode(fields: &[(String, String)]) -> String {
    // String pairs always serialize.
    serde_urlencoded::to_string(fields).unwrap_or_default()
}

/// Encode `kind` into body bytes, updating `headers` with its content type.
///
/// Multipart and JSON bodies overwrite any `content-type` already present. A
/// form-urlencoded body only sets it when the caller has not. Raw bodies leave
/// the headers alone.
pub fn encode(kind: BodyKind<'_>, headers: &mut Headers) -> Vec<u8> {
    match kind {
        BodyKind::Form(fields) => {
            let encoder = MultipartEncoder::new(coerce_fields(fields));
            headers.insert("content-type", encoder.content_type());
            encoder.encode()
        }
        BodyKind::Json(value) => {
            headers.insert("content-type", JSON_CONTENT_TYPE);
            value.to_string().into_bytes()
        }
        BodyKind::Data(fields) => {
            if !headers.contains("content-type") {
                headers.insert("content-type", FORM_CONTENT_TYPE);
            }
            urlencode(&coerce_fields(fields)).into_bytes()
        }
        BodyKind::Raw(bytes) => bytes.to_vec(),
    }
}

/// Minimal `multipart/form-data` encoder for text fields.
#[derive(Debug, Clone)]
pub struct MultipartEncoder {
    boundary: String,
    fields: Vec<(String, String)>,
}

impl MultipartEncoder {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self::with_boundary(fields, gen_boundary())
    }

    pub fn with_boundary(fields: Vec<(String, String)>, boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for (name, value) in &self.fields {
            buf.extend_from_slice(b"--");
            buf.extend_from_slice(self.boundary.as_bytes());
            buf.extend_from_slice(b"\r\nContent-Disposition: form-data; name=\"");
            buf.extend_from_slice(escape_name(name).as_bytes());
            buf.extend_from_slice(b"\"\r\n\r\n");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"--");
        buf.extend_from_slice(self.boundary.as_bytes());
        buf.extend_from_slice(b"--\r\n");
        buf
    }
}

// Quote, CR and LF would break out of the quoted parameter.
fn escape_name(name: &str) -> String {
    name.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}

fn gen_boundary() -> String {
    format!("------------------------{}", Uuid::new_v4().simple())
}
