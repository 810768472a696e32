//! Human-readable dump of a request/response pair.
//!
//! # Design
//! `render` is a pure function of its two arguments. Output layout:
//!
//! ```text
//! POST http://host/path?query
//! <request body, only when present>
//!
//! HTTP/1.1 200
//! <headers sorted by name, case-insensitive>
//!
//! <response body, only when non-empty>
//! ```
//!
//! Bodies are formatted by their content type (default `text/plain`):
//! `application/json` is parsed and pretty-printed with sorted keys and a
//! 2-space indent, keeping non-ASCII characters literal; everything else,
//! `text/*` included, is printed as received. JSON that fails to parse is
//! printed behind `UNPARSED_MARKER`.

use serde_json::Value;

use crate::http::HttpRequest;
use crate::response::Response;

/// Prefix for a JSON body that could not be parsed.
pub const UNPARSED_MARKER: &str = "(unparsed)";

pub fn render(request: &HttpRequest, response: &Response) -> String {
    let mut lines = vec![format!("{} {}", request.method, request.full_url())];

    if let Some(body) = request.body_text().filter(|body| !body.is_empty()) {
        lines.push(render_body(request.headers.get("content-type"), &body));
    }

    lines.push(String::new());
    lines.push(format!("HTTP/1.1 {}", response.status()));

    let mut headers: Vec<(&str, &str)> = response.headers().iter().collect();
    headers.sort_by(|a, b| {
        a.0.to_ascii_lowercase()
            .cmp(&b.0.to_ascii_lowercase())
            .then_with(|| a.cmp(b))
    });
    lines.extend(headers.into_iter().map(|(name, value)| format!("{name}: {value}")));

    if !response.text().is_empty() {
        lines.push(String::new());
        lines.push(render_body(response.content_type(), response.text()));
    }

    lines.join("\n")
}

/// Format one body according to `content_type`.
pub fn render_body(content_type: Option<&str>, text: &str) -> String {
    let content_type = content_type.unwrap_or("text/plain").to_ascii_lowercase();
    if content_type.starts_with("application/json") {
        pretty_json(text)
    } else {
        text.to_string()
    }
}

fn pretty_json(text: &str) -> String {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => sort_keys(value),
        Err(_) => return format!("{UNPARSED_MARKER} {text}"),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| format!("{UNPARSED_MARKER} {text}"))
}

// Object key order otherwise depends on serde_json's `preserve_order` feature.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::CookieJar;
    use crate::http::{Headers, HttpMethod, HttpResponse, Params};

    fn request(method: HttpMethod, content_type: Option<&str>, body: Option<&str>) -> HttpRequest {
        let mut headers = Headers::new();
        if let Some(ct) = content_type {
            headers.insert("content-type", ct);
        }
        HttpRequest {
            method,
            url: "http://localhost/x".to_string(),
            params: Params::new(),
            headers,
            cookies: CookieJar::new(),
            body: body.map(|b| b.as_bytes().to_vec()),
            timeout: None,
            allow_redirects: false,
        }
    }

    fn response(request: &HttpRequest, status: u16, headers: &[(&str, &str)], body: &str) -> Response {
        Response::new(
            request.clone(),
            HttpResponse {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            },
        )
    }

    #[test]
    fn json_request_and_response_are_pretty_printed() {
        let req = request(HttpMethod::Post, Some("application/json"), Some(r#"{"b":1,"a":2}"#));
        let resp = response(&req, 200, &[("content-type", "application/json")], r#"{"a":2,"b":1}"#);
        let expected = "POST http://localhost/x\n\
                        {\n  \"a\": 2,\n  \"b\": 1\n}\n\
                        \n\
                        HTTP/1.1 200\n\
                        content-type: application/json\n\
                        \n\
                        {\n  \"a\": 2,\n  \"b\": 1\n}";
        assert_eq!(render(&req, &resp), expected);
    }

    #[test]
    fn malformed_json_response_is_marked() {
        let req = request(HttpMethod::Get, None, None);
        let resp = response(&req, 200, &[("content-type", "application/json")], "not-json");
        let out = render(&req, &resp);
        assert!(out.ends_with("\n\n(unparsed) not-json"), "{out}");
    }

    #[test]
    fn malformed_json_request_is_marked() {
        let req = request(HttpMethod::Put, Some("application/json"), Some("{oops"));
        let resp = response(&req, 204, &[], "");
        assert_eq!(render(&req, &resp), "PUT http://localhost/x\n(unparsed) {oops\n\nHTTP/1.1 204");
    }

    #[test]
    fn headers_are_sorted_ignoring_case() {
        let req = request(HttpMethod::Get, None, None);
        let resp = response(
            &req,
            200,
            &[("x-b", "2"), ("Content-Type", "text/plain"), ("X-A", "1"), ("date", "today")],
            "ok",
        );
        assert_eq!(
            render(&req, &resp),
            "GET http://localhost/x\n\nHTTP/1.1 200\nContent-Type: text/plain\ndate: today\nX-A: 1\nx-b: 2\n\nok"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let req = request(HttpMethod::Post, Some("application/json"), Some(r#"{"z":{"b":1,"a":[{"d":1,"c":2}]}}"#));
        let resp = response(&req, 201, &[("b", "1"), ("a", "2")], "created");
        let first = render(&req, &resp);
        assert_eq!(first, render(&req, &resp));
        assert!(first.contains("\"a\": [\n      {\n        \"c\": 2,\n        \"d\": 1\n      }\n    ],\n    \"b\": 1"));
    }

    #[test]
    fn non_ascii_is_kept_literal() {
        assert_eq!(
            render_body(Some("application/json; charset=utf-8"), r#"{"name":"Müller ü"}"#),
            "{\n  \"name\": \"Müller ü\"\n}"
        );
    }

    #[test]
    fn content_type_match_ignores_case() {
        assert_eq!(render_body(Some("Application/JSON"), "[1]"), "[\n  1\n]");
    }

    #[test]
    fn text_and_unknown_types_are_printed_as_is() {
        assert_eq!(render_body(Some("text/html"), "<p>{}</p>"), "<p>{}</p>");
        assert_eq!(render_body(None, "{\"a\":1}"), "{\"a\":1}");
        assert_eq!(render_body(Some("application/x-www-form-urlencoded"), "a=1&b=2"), "a=1&b=2");
    }

    #[test]
    fn empty_request_body_is_skipped() {
        let req = request(HttpMethod::Post, Some("text/plain"), Some(""));
        let resp = response(&req, 200, &[], "");
        assert_eq!(render(&req, &resp), "POST http://localhost/x\n\nHTTP/1.1 200");
    }
}
