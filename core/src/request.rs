//! Per-request options and the typed builder that collects them.

use std::marker::PhantomData;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::body::BodyKind;
use crate::client::Client;
use crate::cookie::CookieJar;
use crate::http::{Headers, HttpMethod, HttpRequest, Params};
use crate::response::Response;
use crate::transport::Transport;

/// Everything a caller supplied for one request, before client defaults are
/// merged in.
///
/// At most one body is sent. When several body slots are filled the first of
/// `form`, `json`, `data`, `raw` wins and the rest are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub params: Params,
    pub headers: Headers,
    pub cookies: CookieJar,
    /// Form-urlencoded fields.
    pub data: Option<Map<String, Value>>,
    /// Multipart fields.
    pub form: Option<Map<String, Value>>,
    pub json: Option<Value>,
    pub raw: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
    pub allow_redirects: bool,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Params::new(),
            headers: Headers::new(),
            cookies: CookieJar::new(),
            data: None,
            form: None,
            json: None,
            raw: None,
            timeout: None,
            allow_redirects: false,
        }
    }

    /// The body that will be sent, picked in `form > json > data > raw` order.
    pub fn body_kind(&self) -> Option<BodyKind<'_>> {
        if let Some(form) = &self.form {
            return Some(BodyKind::Form(form));
        }
        if let Some(json) = &self.json {
            return Some(BodyKind::Json(json));
        }
        if let Some(data) = &self.data {
            return Some(BodyKind::Data(data));
        }
        self.raw.as_deref().map(BodyKind::Raw)
    }
}

/// Builder state for requests that may carry a body.
#[derive(Debug)]
pub struct WithBody;

/// Builder state for GET, HEAD and OPTIONS, which take no body.
#[derive(Debug)]
pub struct WithoutBody;

/// Collects request options and sends them through its `Client`.
///
/// Body setters only exist on `RequestBuilder<_, _, WithBody>`.
#[derive(Debug)]
pub struct RequestBuilder<'a, T, B> {
    client: &'a Client<T>,
    spec: RequestSpec,
    _body: PhantomData<B>,
}

impl<'a, T, B> RequestBuilder<'a, T, B> {
    pub(crate) fn new(client: &'a Client<T>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            client,
            spec: RequestSpec::new(method, url),
            _body: PhantomData,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.params.insert(name.into(), value.into());
        self
    }

    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.spec
            .params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.headers.insert(name, value);
        self
    }

    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.spec.headers.insert(name, value);
        }
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.cookies.set(name, value);
        self
    }

    /// Add every cookie from a mapping, a pair list or another jar.
    pub fn cookies(mut self, cookies: impl Into<CookieJar>) -> Self {
        self.spec.cookies = self.spec.cookies.merged(&cookies.into());
        self
    }

    /// Ignored when the client has its own timeout configured.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.spec.timeout = Some(timeout);
        self
    }

    pub fn allow_redirects(mut self, allow: bool) -> Self {
        self.spec.allow_redirects = allow;
        self
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub fn into_spec(self) -> RequestSpec {
        self.spec
    }

    /// The request as it would be handed to the transport.
    pub fn prepare(&self) -> HttpRequest {
        self.client.prepare(&self.spec)
    }
}

impl<'a, T: Transport, B> RequestBuilder<'a, T, B> {
    pub fn send(self) -> Result<Response, T::Error> {
        self.client.execute(&self.spec)
    }
}

impl<'a, T> RequestBuilder<'a, T, WithBody> {
    /// Form-urlencoded body. Non-string values are sent as JSON text.
    pub fn data<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.spec.data = Some(collect_fields(fields));
        self
    }

    /// Multipart body. Non-string values are sent as JSON text.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.spec.form = Some(collect_fields(fields));
        self
    }

    pub fn json(mut self, value: impl Into<Value>) -> Self {
        self.spec.json = Some(value.into());
        self
    }

    pub fn raw(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.spec.raw = Some(body.into());
        self
    }
}

fn collect_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Map<String, Value>
where
    K: Into<String>,
    V: Into<Value>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
