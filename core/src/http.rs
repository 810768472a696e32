//! HTTP types exchanged with the transport.
//!
//! # Design
//! `HttpRequest` is the fully merged request handed to a `Transport`, and
//! `HttpResponse` is what the transport hands back: status, headers and the
//! body decoded as text. Both are plain data with owned fields so a transport
//! can be anything from a real HTTP client to a closure in a test.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::cookie::CookieJar;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters, kept sorted by name so the encoded query string is stable.
pub type Params = BTreeMap<String, String>;

/// Header list with case-insensitive name lookup.
///
/// Insertion order is preserved. `insert` replaces every entry with the same
/// name (ignoring case) while `append` keeps duplicates, which response
/// headers such as `set-cookie` need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// First value stored under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, replacing any existing entries for that name.
    ///
    /// The replacement takes the position of the first replaced entry and the
    /// spelling of the new name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut replaced = false;
        self.0.retain_mut(|(key, current)| {
            if !key.eq_ignore_ascii_case(&name) {
                return true;
            }
            if replaced {
                return false;
            }
            replaced = true;
            *key = name.clone();
            *current = value.clone();
            true
        });
        if !replaced {
            self.0.push((name, value));
        }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// A request after client defaults have been merged in and the body encoded.
///
/// Built by `Client::prepare`. Transports execute it; the renderer prints it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: Params,
    pub headers: Headers,
    pub cookies: CookieJar,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
    pub allow_redirects: bool,
}

impl HttpRequest {
    /// The request URL with `params` appended as an encoded query string.
    pub fn full_url(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        // A map of strings always serializes.
        let query = serde_urlencoded::to_string(&self.params).unwrap_or_default();
        let (base, fragment) = match self.url.find('#') {
            Some(at) => self.url.split_at(at),
            None => (self.url.as_str(), ""),
        };
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}{query}{fragment}")
    }

    /// Value for the single `Cookie` header sent on the wire.
    ///
    /// Pairs from a caller-set `cookie` header are folded into the jar and
    /// win on a name collision, since they were spelled out for this request.
    pub fn cookie_header(&self) -> Option<String> {
        let explicit: Vec<&str> = self
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("cookie"))
            .map(|(_, value)| value)
            .collect();
        if explicit.is_empty() {
            return self.cookies.header_value();
        }
        let mut jar = self.cookies.clone();
        for pair in explicit.iter().flat_map(|value| value.split(';')) {
            if let Some((name, value)) = pair.split_once('=') {
                jar.set(name.trim(), value.trim());
            }
        }
        jar.header_value()
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }
}

/// What a transport returns for a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
