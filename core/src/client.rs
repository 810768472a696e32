//! Client configuration and the request merge.
//!
//! # Design
//! `Client` owns a `ClientConfig` and a transport and never mutates either
//! after construction. `prepare` is a pure function of the config and one
//! `RequestSpec`: it merges defaults, encodes the body and returns a fresh
//! `HttpRequest`. `execute` hands that request to the transport and wraps the
//! result in a `Response`. Transport errors are returned exactly as the
//! transport produced them.
//!
//! Merge rules:
//! - params, headers and cookies: client defaults are the base, request
//!   values replace same-named entries (header names ignore case);
//! - timeout: a configured client timeout always wins over the request's.

use std::time::Duration;

use crate::body;
use crate::cookie::CookieJar;
use crate::http::{Headers, HttpMethod, HttpRequest, Params};
use crate::request::{RequestBuilder, RequestSpec, WithBody, WithoutBody};
use crate::response::Response;
use crate::transport::Transport;

/// Defaults applied to every request sent through one `Client`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    pub params: Params,
    pub headers: Headers,
    pub cookies: CookieJar,
    /// Overrides any per-request timeout when set.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Client<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { config, transport }
    }

    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder {
            config: ClientConfig::default(),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request(&self, method: HttpMethod, url: impl Into<String>) -> RequestBuilder<'_, T, WithBody> {
        RequestBuilder::new(self, method, url)
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithoutBody> {
        RequestBuilder::new(self, HttpMethod::Get, url)
    }

    pub fn head(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithoutBody> {
        RequestBuilder::new(self, HttpMethod::Head, url)
    }

    pub fn options(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithoutBody> {
        RequestBuilder::new(self, HttpMethod::Options, url)
    }

    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithBody> {
        RequestBuilder::new(self, HttpMethod::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithBody> {
        RequestBuilder::new(self, HttpMethod::Put, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithBody> {
        RequestBuilder::new(self, HttpMethod::Patch, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder<'_, T, WithBody> {
        RequestBuilder::new(self, HttpMethod::Delete, url)
    }

    /// Merge `spec` with the client defaults and encode its body.
    pub fn prepare(&self, spec: &RequestSpec) -> HttpRequest {
        let mut headers = merge_headers(&self.config.headers, &spec.headers);
        let body = spec.body_kind().map(|kind| body::encode(kind, &mut headers));
        HttpRequest {
            method: spec.method,
            url: spec.url.clone(),
            params: merge_params(&self.config.params, &spec.params),
            headers,
            cookies: self.config.cookies.merged(&spec.cookies),
            body,
            timeout: self.config.timeout.or(spec.timeout),
            allow_redirects: spec.allow_redirects,
        }
    }
}

impl<T: Transport> Client<T> {
    pub fn execute(&self, spec: &RequestSpec) -> Result<Response, T::Error> {
        let request = self.prepare(spec);
        tracing::debug!(
            method = %request.method,
            url = %request.full_url(),
            allow_redirects = request.allow_redirects,
            "sending request"
        );
        let raw = self.transport.perform(&request)?;
        tracing::debug!(status = raw.status, headers = raw.headers.len(), "received response");
        Ok(Response::new(request, raw))
    }
}

/// Collects `ClientConfig` defaults before the client is built.
#[derive(Debug)]
pub struct ClientBuilder<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> ClientBuilder<T> {
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.params.insert(name.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.cookies.set(name, value);
        self
    }

    pub fn cookies(mut self, cookies: impl Into<CookieJar>) -> Self {
        self.config.cookies = self.config.cookies.merged(&cookies.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Client<T> {
        Client::with_config(self.transport, self.config)
    }
}

fn merge_params(defaults: &Params, overrides: &Params) -> Params {
    let mut params = defaults.clone();
    params.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

fn merge_headers(defaults: &Headers, overrides: &Headers) -> Headers {
    let mut headers = defaults.clone();
    for (name, value) in overrides.iter() {
        headers.insert(name, value);
    }
    headers
}
