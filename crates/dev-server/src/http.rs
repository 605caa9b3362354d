//! Just enough HTTP/1.1 for a local dev server.
//!
//! One request per connection: the head is read, the body (if any) is
//! ignored, and the response is written with `connection: close`.

use percent_encoding::percent_decode_str;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{MAX_REQUEST_HEAD, ServerError};

/// Request methods the server distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Other(String),
}

/// A parsed request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Percent-decoded path without query string or fragment.
    pub path: String,
}

impl Request {
    /// Parses the request line of `head`. Headers are not needed.
    pub fn parse(head: &str) -> Result<Self, ServerError> {
        let line = head.lines().next().unwrap_or_default();
        let mut parts = line.split_ascii_whitespace();

        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ServerError::BadRequest(format!("malformed request line: {line:?}")));
        };
        if !version.starts_with("HTTP/1.") {
            return Err(ServerError::BadRequest(format!("unsupported version {version}")));
        }

        let method = match method {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            other => Method::Other(other.to_owned()),
        };

        let raw_path = target
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        if !raw_path.starts_with('/') {
            return Err(ServerError::BadRequest(format!("bad request target {target:?}")));
        }
        let path = percent_decode(raw_path)
            .ok_or_else(|| ServerError::BadRequest(format!("bad escape in {raw_path:?}")))?;

        Ok(Self { method, path })
    }
}

/// Reads bytes until the blank line that ends the request head.
pub async fn read_head<S>(stream: &mut S) -> Result<String, ServerError>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(ServerError::BadRequest("connection closed mid-request".into()));
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_head_end(&buf) {
            buf.truncate(end);
            return String::from_utf8(buf)
                .map_err(|_| ServerError::BadRequest("request head is not UTF-8".into()));
        }
        if buf.len() > MAX_REQUEST_HEAD {
            return Err(ServerError::BadRequest("request head too large".into()));
        }
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Decodes `%XX` escapes. Returns `None` for broken escapes or non-UTF-8
/// results.
fn percent_decode(s: &str) -> Option<String> {
    if !escapes_well_formed(s) {
        return None;
    }
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Every `%` must be followed by exactly two hex digits.
fn escapes_well_formed(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

/// An HTTP response with a fully buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub extra_headers: Vec<(&'static str, String)>,
}

impl Response {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
            extra_headers: Vec::new(),
        }
    }

    /// JSON response from any serializable value.
    pub fn json<T: serde::Serialize>(status: u16, value: &T) -> Result<Self, ServerError> {
        Ok(Self::new(status, "application/json", serde_json::to_vec(value)?))
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extra_headers.push((name, value.into()));
        self
    }

    /// Writes the response. With `include_body = false` (HEAD) only the
    /// head goes out, still advertising the real length.
    pub async fn write_to<S>(&self, stream: &mut S, include_body: bool) -> Result<(), ServerError>
    where
        S: AsyncWrite + Unpin,
    {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len()
        );
        for (name, value) in &self.extra_headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str("\r\n");

        stream.write_all(head.as_bytes()).await?;
        if include_body {
            stream.write_all(&self.body).await?;
        }
        stream.flush().await?;
        Ok(())
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "",
    }
}
