//! The seam between request shaping and actual I/O.
//!
//! # Design
//! A `Transport` receives a fully merged `HttpRequest` and returns status,
//! headers and body text. The crate never opens sockets itself. Closures of
//! the right shape are transports, which keeps tests free of networking;
//! `UreqTransport` is the blocking implementation for real use.

use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "ureq")]
mod blocking;

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

pub trait Transport {
    /// Failure reported by the transport, returned to callers unchanged.
    type Error;

    /// Execute `request`, honoring its timeout and `allow_redirects` flag.
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, E>,
{
    type Error = E;

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, E> {
        self(request)
    }
}
