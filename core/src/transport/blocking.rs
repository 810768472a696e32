use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Blocking transport backed by `ureq`.
///
/// Each call gets its own agent configured from the request: 4xx/5xx
/// responses are returned as data, redirects are only followed when
/// `allow_redirects` is set, and the request timeout becomes the agent's
/// global timeout. Params are sent in the query string and cookies as a
/// single `cookie` header (see `HttpRequest::cookie_header`).
#[derive(Debug, Clone)]
pub struct UreqTransport {
    max_redirects: u32,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Redirect limit used for requests that allow redirects.
    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    fn agent(&self, request: &HttpRequest) -> Agent {
        let max_redirects = if request.allow_redirects { self.max_redirects } else { 0 };
        Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(max_redirects)
            .timeout_global(request.timeout)
            .build()
            .new_agent()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let agent = self.agent(request);
        let url = request.full_url();
        let body = request.body.as_deref();

        let mut response = match request.method {
            HttpMethod::Get => call(decorate(agent.get(url.as_str()), request), body),
            HttpMethod::Head => call(decorate(agent.head(url.as_str()), request), body),
            HttpMethod::Options => call(decorate(agent.options(url.as_str()), request), body),
            HttpMethod::Delete => call(decorate(agent.delete(url.as_str()), request), body),
            HttpMethod::Post => send(decorate(agent.post(url.as_str()), request), body),
            HttpMethod::Put => send(decorate(agent.put(url.as_str()), request), body),
            HttpMethod::Patch => send(decorate(agent.patch(url.as_str()), request), body),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (name.as_str().to_string(), value)
            })
            .collect();
        // ureq caps bodies at 10 MiB by default; a completed exchange is data.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn decorate<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in request.headers.iter() {
        if !name.eq_ignore_ascii_case("cookie") {
            builder = builder.header(name, value);
        }
    }
    if let Some(cookie) = request.cookie_header() {
        builder = builder.header("cookie", cookie);
    }
    builder
}

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

// DELETE may still carry a body even though ureq builds it without one.
fn call(builder: RequestBuilder<WithoutBody>, body: Option<&[u8]>) -> UreqResult {
    match body {
        Some(bytes) => builder.force_send_body().send(bytes),
        None => builder.call(),
    }
}

fn send(builder: RequestBuilder<WithBody>, body: Option<&[u8]>) -> UreqResult {
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}
