//! Request shaping and exchange rendering on top of a pluggable HTTP transport.
//!
//! # Overview
//! A `Client` holds default params, headers, cookies and an optional timeout.
//! Each request merges those defaults with its own values, encodes one body
//! (multipart form, JSON, form-urlencoded data or raw bytes) and is handed to
//! a `Transport`. The returned `Response` decodes JSON bodies lazily, and
//! `render` prints a request/response pair for logs and debugging.
//!
//! # Design
//! - `Client::prepare` is pure: it builds an `HttpRequest` without I/O, so the
//!   merge rules are testable without a network.
//! - Transport errors are returned as the transport's own error type.
//! - Redirects are not followed unless a request opts in, so the redirect
//!   response itself is visible.
//! - GET, HEAD and OPTIONS builders have no body setters at all.
//!
//! ```no_run
//! # #[cfg(feature = "ureq")]
//! # fn main() -> Result<(), ureq::Error> {
//! use reqlens_core::{render, Client, UreqTransport};
//! use serde_json::json;
//!
//! let client = Client::builder(UreqTransport::new())
//!     .header("accept", "application/json")
//!     .build();
//! let response = client
//!     .post("http://localhost:3000/echo")
//!     .json(json!({"name": "bob"}))
//!     .send()?;
//! println!("{}", render(response.request(), &response));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "ureq"))]
//! # fn main() {}
//! ```

pub mod body;
pub mod client;
pub mod cookie;
pub mod error;
pub mod http;
pub mod render;
pub mod request;
pub mod response;
pub mod transport;

pub use body::{coerce, BodyKind, MultipartEncoder};
pub use client::{Client, ClientBuilder, ClientConfig};
pub use cookie::CookieJar;
pub use error::Error;
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse, Params};
pub use render::render;
pub use request::{RequestBuilder, RequestSpec, WithBody, WithoutBody};
pub use response::{Body, Response};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
