//! Completed exchanges.
//!
//! # Design
//! A `Response` is created once per call and never changes afterwards. The
//! decoded `body()` is computed on first access and cached; a JSON content
//! type with an unparseable body quietly falls back to text. Callers that need
//! a typed value and want to know about bad JSON use `json()` instead.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::http::{Headers, HttpRequest, HttpResponse};

/// A response body decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Json(_) => None,
            Body::Text(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    request: HttpRequest,
    status: u16,
    headers: Headers,
    text: String,
    body: OnceLock<Body>,
}

impl Response {
    pub fn new(request: HttpRequest, raw: HttpResponse) -> Self {
        let mut headers = Headers::new();
        for (name, value) in raw.headers {
            headers.append(name, value);
        }
        Self {
            request,
            status: raw.status,
            headers,
            text: raw.body,
            body: OnceLock::new(),
        }
    }

    /// The merged request that produced this response.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// The body exactly as received.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The body decoded as JSON when the content type mentions `json` and the
    /// text parses, otherwise the raw text.
    pub fn body(&self) -> &Body {
        self.body.get_or_init(|| self.decode())
    }

    /// Deserialize the body into `D`, failing on invalid JSON.
    pub fn json<D: DeserializeOwned>(&self) -> Result<D, Error> {
        let value = match self.body() {
            Body::Json(value) => D::deserialize(value)?,
            Body::Text(text) => serde_json::from_str(text)?,
        };
        Ok(value)
    }

    fn decode(&self) -> Body {
        let is_json = self
            .content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        if is_json {
            match serde_json::from_str(&self.text) {
                Ok(value) => return Body::Json(value),
                Err(err) => tracing::trace!(%err, "json content type with non-json body"),
            }
        }
        Body::Text(self.text.clone())
    }
}
