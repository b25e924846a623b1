//! Shared test fixtures for webhook tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::time::Sleeper;

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn success() -> Self {
        Self::new(vec![Ok(response(http::StatusCode::OK, ""))])
    }

    /// `n` rate-limited responses with the given body, then 204.
    pub fn rate_limited_then_success(n: usize, body: &str) -> Self {
        let mut responses: Vec<_> = (0..n).map(|_| Ok(rate_limited(body))).collect();
        responses.push(Ok(response(http::StatusCode::NO_CONTENT, "")));
        Self::new(responses)
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for std::sync::Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

pub fn response(status: http::StatusCode, body: &str) -> HttpResponse {
    HttpResponse::new(status, http::HeaderMap::new(), body.as_bytes().to_vec())
}

pub fn rate_limited(body: &str) -> HttpResponse {
    response(http::StatusCode::TOO_MANY_REQUESTS, body)
}

/// A sleeper that records requested durations without waiting.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

impl Sleeper for std::sync::Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

/// One decoded part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub headers: Vec<(String, String)>,
    pub data: Vec<u8>,
}

impl Part {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `name="..."` parameter of the Content-Disposition header.
    pub fn name(&self) -> Option<&str> {
        disposition_param(self.header("Content-Disposition")?, "name")
    }

    /// The `filename="..."` parameter of the Content-Disposition header.
    pub fn filename(&self) -> Option<&str> {
        disposition_param(self.header("Content-Disposition")?, "filename")
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap()
    }
}

fn disposition_param<'a>(disposition: &'a str, param: &str) -> Option<&'a str> {
    disposition.split("; ").find_map(|segment| {
        segment
            .strip_prefix(param)?
            .strip_prefix("=\"")?
            .strip_suffix('"')
    })
}

/// Decodes a `multipart/form-data` body framed with `boundary`.
///
/// Panics if the framing is malformed.
pub fn parse_multipart(body: &[u8], boundary: &str) -> Vec<Part> {
    let opening = format!("--{boundary}\r\n");
    let delimiter = format!("\r\n--{boundary}");
    let closing = format!("\r\n--{boundary}--\r\n");

    assert!(body.starts_with(opening.as_bytes()), "missing opening boundary");
    assert!(body.ends_with(closing.as_bytes()), "missing closing boundary");

    // Strip the opening line, then split the rest on the delimiter.
    let mut rest = &body[opening.len()..body.len() - closing.len()];
    let mut parts = Vec::new();

    loop {
        let (raw, next) = match find(rest, format!("{delimiter}\r\n").as_bytes()) {
            Some(idx) => (&rest[..idx], Some(&rest[idx + delimiter.len() + 2..])),
            None => (rest, None),
        };
        parts.push(parse_part(raw));

        match next {
            Some(next) => rest = next,
            None => break,
        }
    }

    parts
}

fn parse_part(raw: &[u8]) -> Part {
    let split = find(raw, b"\r\n\r\n").expect("part has no header terminator");
    let head = std::str::from_utf8(&raw[..split]).unwrap();
    let headers = head
        .split("\r\n")
        .map(|line| {
            let (name, value) = line.split_once(": ").expect("malformed part header");
            (name.to_string(), value.to_string())
        })
        .collect();

    Part {
        headers,
        data: raw[split + 4..].to_vec(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
