use super::push_latin1;
use super::stream::{HttpInputStream, HttpOutputStream};
use super::url::{Scheme, Url};
use crate::network::error::Error;
use crate::network::{Connect, Connection};
use core::fmt::Write;
use heapless::{String, Vec};

/// Maximum number of request or response headers kept.
pub const MAX_HEADERS: usize = 16;
/// Maximum length of a header name.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value.
pub const MAX_HEADER_VALUE_LEN: usize = 256;
/// Maximum length of a response reason phrase.
pub const MAX_REASON_LEN: usize = 64;
/// Default capacity of the buffered request body.
pub const DEFAULT_REQUEST_BODY_LEN: usize = 4096;
/// Upper bound on the bytes of one response head, interim heads included.
///
/// Lines that do not fit the header limits are dropped, so this only guards
/// against a peer that never ends its head.
pub const MAX_RESPONSE_HEAD_LEN: usize = 64 * 1024;

const MAX_REQUEST_HEAD_LEN: usize = 2048;
const MAX_HEAD_LINE_LEN: usize = MAX_HEADER_NAME_LEN + MAX_HEADER_VALUE_LEN + 4;
const MAX_LINE_LEN: usize = 128;
const RX_BUFFER_LEN: usize = 512;

const DEFAULT_USER_AGENT: &str = concat!("libpost/", env!("CARGO_PKG_VERSION"));

// Headers the connection derives itself
const RESERVED_HEADERS: [&str; 4] = ["Host", "Content-Length", "Connection", "Transfer-Encoding"];

type HeadLine = Vec<u8, MAX_HEAD_LINE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    fn carries_body(&self) -> bool {
        matches!(self, Method::Post)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, rejecting names or values that would break the framing.
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        if name.is_empty() || name.contains([':', '\r', '\n']) || value.contains(['\r', '\n']) {
            return Err(Error::ProtocolError);
        }
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::BufferOverflow)?,
            value: String::try_from(value).map_err(|_| Error::BufferOverflow)?,
        })
    }
}

pub(crate) fn find_header<'h>(headers: &'h [Header], name: &str) -> Option<&'h str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Status line and headers of a received response.
///
/// Reason phrases and header values are decoded as ISO-8859-1, so bytes
/// outside ASCII never fail a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status_code: u16,
    pub reason: String<MAX_REASON_LEN>,
    pub headers: Vec<Header, MAX_HEADERS>,
    /// Declared body length; `None` when absent or when the body is chunked.
    pub content_length: Option<usize>,
    chunked: bool,
}

impl ResponseHead {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Parses a status line and header block, up to the first empty line.
    ///
    /// Headers beyond [`MAX_HEADERS`] or longer than the header limits are not
    /// kept, but `Content-Length` and `Transfer-Encoding` are always honored.
    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        let mut lines = raw
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

        let mut head = Self::from_status_line(lines.next().ok_or(Error::ProtocolError)?)?;
        for line in lines.take_while(|line| !line.is_empty()) {
            head.push_header_line(line, false)?;
        }
        head.finish();
        Ok(head)
    }

    fn from_status_line(line: &[u8]) -> Result<Self, Error> {
        let mut parts = line.splitn(3, |&b| b == b' ');
        let version = parts.next().ok_or(Error::ProtocolError)?;
        if !version.starts_with(b"HTTP/") {
            return Err(Error::ProtocolError);
        }
        let status_code = parts
            .next()
            .and_then(|code| core::str::from_utf8(code).ok())
            .and_then(|code| code.parse::<u16>().ok())
            .ok_or(Error::ProtocolError)?;
        if !(100..=999).contains(&status_code) {
            return Err(Error::ProtocolError);
        }

        // Long reasons are cut, not rejected
        let mut reason = String::new();
        push_latin1(&mut reason, parts.next().unwrap_or(b"").trim_ascii());

        Ok(Self {
            status_code,
            reason,
            headers: Vec::new(),
            content_length: None,
            chunked: false,
        })
    }

    /// Takes one header line. `truncated` marks a line that did not fit the
    /// line buffer; only its prefix is present.
    fn push_header_line(&mut self, line: &[u8], truncated: bool) -> Result<(), Error> {
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(Error::ProtocolError)?;
        let value = line[colon + 1..].trim_ascii();
        let Ok(name) = core::str::from_utf8(&line[..colon]) else {
            trace!("skipping response header with a non-ASCII name");
            return Ok(());
        };
        let name = name.trim();

        if name.eq_ignore_ascii_case("Content-Length") {
            if truncated {
                return Err(Error::ProtocolError);
            }
            let len = core::str::from_utf8(value)
                .ok()
                .and_then(|len| len.parse::<usize>().ok())
                .ok_or(Error::ProtocolError)?;
            self.content_length = Some(len);
        } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
            if truncated {
                return Err(Error::ProtocolError);
            }
            // Only the final coding decides the framing
            self.chunked = value
                .rsplit(|&b| b == b',')
                .next()
                .is_some_and(|coding| coding.trim_ascii().eq_ignore_ascii_case(b"chunked"));
        }

        let mut decoded: String<MAX_HEADER_VALUE_LEN> = String::new();
        if truncated || !push_latin1(&mut decoded, value) {
            trace!("skipping oversized response header {}", name);
            return Ok(());
        }
        match Header::new(name, &decoded) {
            Ok(header) => {
                if self.headers.push(header).is_err() {
                    trace!("dropping response header {}", name);
                }
            }
            Err(_) => trace!("skipping malformed response header {}", name),
        }
        Ok(())
    }

    fn finish(&mut self) {
        if self.chunked {
            self.content_length = None;
        }
    }

    fn body_framing(&self) -> Body {
        if self.status_code == 204 || self.status_code == 304 {
            Body::Empty
        } else if self.chunked {
            Body::Chunked(0)
        } else if let Some(len) = self.content_length {
            Body::Length(len)
        } else {
            Body::UntilClose
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Configuring,
    Sent,
    Received,
    Broken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Body {
    /// Nothing (more) to read.
    Empty,
    /// Bytes left before the declared length is reached.
    Length(usize),
    /// Bytes left in the current chunk; zero means a size line comes next.
    Chunked(usize),
    /// Delimited by the peer closing the connection.
    UntilClose,
    /// A reader was handed out and released.
    Consumed,
}

/// A single HTTP/1.1 request/response exchange over an exclusively owned connection.
///
/// The connection is configured first, then the request body is written
/// through [`output_stream`](Self::output_stream). The request is transmitted
/// when that stream is closed, or at the latest when the response is first
/// inspected. [`disconnect`](Self::disconnect) consumes the handle, so a
/// connection is released exactly once and never reused.
///
/// `B` is the capacity of the buffered request body.
#[derive(Debug)]
pub struct HttpConnection<C: Connection, const B: usize = DEFAULT_REQUEST_BODY_LEN> {
    connection: C,
    url: Url,
    method: Method,
    use_caches: bool,
    do_input: bool,
    do_output: bool,
    request_headers: Vec<Header, MAX_HEADERS>,
    request_body: Vec<u8, B>,
    stage: Stage,
    pub(super) response: Option<ResponseHead>,
    pub(super) body: Body,
    rx: [u8; RX_BUFFER_LEN],
    rx_pos: usize,
    rx_len: usize,
}

impl<C: Connection, const B: usize> HttpConnection<C, B> {
    /// Resolves `url` through `connector` and opens a connection to it.
    ///
    /// Fails with [`Error::UnsupportedScheme`] for anything but `http`, and
    /// with the connector's own error when it cannot connect.
    pub fn open<N>(connector: &mut N, url: Url) -> Result<Self, Error>
    where
        N: Connect<Connection = C>,
    {
        if url.scheme != Scheme::Http {
            return Err(Error::UnsupportedScheme);
        }
        let authority = url.authority()?;
        let connection = connector.connect(&authority).map_err(Into::into)?;
        Ok(Self::new(connection, url))
    }

    /// Wraps an already-open connection.
    ///
    /// Defaults: `GET`, caches allowed, input enabled, output disabled.
    pub fn new(connection: C, url: Url) -> Self {
        Self {
            connection,
            url,
            method: Method::Get,
            use_caches: true,
            do_input: true,
            do_output: false,
            request_headers: Vec::new(),
            request_body: Vec::new(),
            stage: Stage::Configuring,
            response: None,
            body: Body::Empty,
            rx: [0; RX_BUFFER_LEN],
            rx_pos: 0,
            rx_len: 0,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn request_method(&self) -> Method {
        self.method
    }

    pub fn use_caches(&self) -> bool {
        self.use_caches
    }

    pub fn do_input(&self) -> bool {
        self.do_input
    }

    pub fn do_output(&self) -> bool {
        self.do_output
    }

    fn check_configurable(&self) -> Result<(), Error> {
        if self.stage == Stage::Configuring {
            Ok(())
        } else {
            Err(Error::AlreadyConnected)
        }
    }

    pub fn set_request_method(&mut self, method: Method) -> Result<(), Error> {
        self.check_configurable()?;
        self.method = method;
        Ok(())
    }

    /// When disabled, the request asks every cache on the path to revalidate.
    pub fn set_use_caches(&mut self, use_caches: bool) -> Result<(), Error> {
        self.check_configurable()?;
        self.use_caches = use_caches;
        Ok(())
    }

    pub fn set_do_input(&mut self, do_input: bool) -> Result<(), Error> {
        self.check_configurable()?;
        self.do_input = do_input;
        Ok(())
    }

    pub fn set_do_output(&mut self, do_output: bool) -> Result<(), Error> {
        self.check_configurable()?;
        self.do_output = do_output;
        Ok(())
    }

    /// Adds a request header.
    ///
    /// `Host`, `Content-Length`, `Connection` and `Transfer-Encoding` are
    /// managed by the connection and rejected here.
    pub fn add_request_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.check_configurable()?;
        if RESERVED_HEADERS.iter().any(|r| r.eq_ignore_ascii_case(name)) {
            return Err(Error::ProtocolError);
        }
        let header = Header::new(name, value)?;
        self.request_headers
            .push(header)
            .map_err(|_| Error::BufferOverflow)
    }

    pub fn request_header(&self, name: &str) -> Option<&str> {
        find_header(&self.request_headers, name)
    }

    /// Returns a scoped writer over the request body.
    pub fn output_stream(&mut self) -> Result<HttpOutputStream<'_, C, B>, Error> {
        self.check_configurable()?;
        if !self.do_output || !self.method.carries_body() {
            return Err(Error::ProtocolError);
        }
        Ok(HttpOutputStream::new(self))
    }

    pub(super) fn write_body(&mut self, buf: &[u8]) -> Result<usize, Error> {
        self.check_configurable()?;
        self.request_body
            .extend_from_slice(buf)
            .map_err(|_| Error::BufferOverflow)?;
        Ok(buf.len())
    }

    /// Transmits the request if it has not been transmitted yet.
    pub fn send_request(&mut self) -> Result<(), Error> {
        match self.stage {
            Stage::Configuring => {}
            Stage::Broken => return Err(Error::ConnectionClosed),
            Stage::Sent | Stage::Received => return Ok(()),
        }
        let result = self.transmit();
        self.stage = match result {
            Ok(()) => Stage::Sent,
            Err(_) => Stage::Broken,
        };
        result
    }

    fn transmit(&mut self) -> Result<(), Error> {
        let head = self.request_head()?;
        trace!(
            "sending {} {} ({} body bytes)",
            self.method.as_str(),
            self.url.path.as_str(),
            self.request_body.len()
        );
        write_all(&mut self.connection, head.as_bytes())?;
        if self.method.carries_body() {
            write_all(&mut self.connection, &self.request_body)?;
        }
        self.connection.flush().map_err(|_| Error::WriteError)
    }

    fn request_head(&self) -> Result<String<MAX_REQUEST_HEAD_LEN>, Error> {
        let mut head: String<MAX_REQUEST_HEAD_LEN> = String::new();
        let overflow = |_| Error::BufferOverflow;

        // Request line
        write!(head, "{} {} HTTP/1.1\r\n", self.method.as_str(), self.url.path).map_err(overflow)?;

        // Headers
        write!(head, "Host: {}\r\n", self.url.host_header()?).map_err(overflow)?;
        if self.request_header("User-Agent").is_none() {
            write!(head, "User-Agent: {}\r\n", DEFAULT_USER_AGENT).map_err(overflow)?;
        }
        if !self.use_caches {
            head.push_str("Cache-Control: no-cache\r\nPragma: no-cache\r\n")
                .map_err(|_| Error::BufferOverflow)?;
        }
        for header in &self.request_headers {
            write!(head, "{}: {}\r\n", header.name, header.value).map_err(overflow)?;
        }
        if self.method.carries_body() {
            write!(head, "Content-Length: {}\r\n", self.request_body.len()).map_err(overflow)?;
        }
        head.push_str("Connection: close\r\n\r\n")
            .map_err(|_| Error::BufferOverflow)?;
        Ok(head)
    }

    /// Transmits the request if needed, then reads the response head.
    ///
    /// Interim `1xx` responses are skipped.
    pub fn response(&mut self) -> Result<&ResponseHead, Error> {
        self.receive_head()?;
        self.response.as_ref().ok_or(Error::NotOpen)
    }

    pub fn response_code(&mut self) -> Result<u16, Error> {
        Ok(self.response()?.status_code)
    }

    pub fn response_message(&mut self) -> Result<&str, Error> {
        Ok(self.response()?.reason.as_str())
    }

    pub fn response_headers(&mut self) -> Result<&[Header], Error> {
        Ok(&self.response()?.headers)
    }

    pub fn header(&mut self, name: &str) -> Result<Option<&str>, Error> {
        Ok(self.response()?.header(name))
    }

    pub fn content_length(&mut self) -> Result<Option<usize>, Error> {
        Ok(self.response()?.content_length)
    }

    fn receive_head(&mut self) -> Result<(), Error> {
        match self.stage {
            Stage::Received => return Ok(()),
            Stage::Broken => return Err(Error::ConnectionClosed),
            Stage::Configuring | Stage::Sent => {}
        }
        self.send_request()?;
        match self.read_head() {
            Ok(head) => {
                trace!("received status {}", head.status_code);
                self.body = head.body_framing();
                self.response = Some(head);
                self.stage = Stage::Received;
                Ok(())
            }
            Err(e) => {
                self.stage = Stage::Broken;
                Err(e)
            }
        }
    }

    fn read_head(&mut self) -> Result<ResponseHead, Error> {
        let mut budget = MAX_RESPONSE_HEAD_LEN;
        loop {
            let (status_line, _) = self
                .read_head_line(&mut budget)?
                .ok_or(Error::ConnectionClosed)?;
            let mut head = ResponseHead::from_status_line(&status_line)?;
            loop {
                match self.read_head_line(&mut budget)? {
                    None => return Err(Error::ProtocolError),
                    Some((line, _)) if line.is_empty() => break,
                    Some((line, truncated)) => head.push_header_line(&line, truncated)?,
                }
            }
            head.finish();

            if (100..200).contains(&head.status_code) {
                trace!("skipping interim status {}", head.status_code);
                continue;
            }
            return Ok(head);
        }
    }

    /// Reads one head line without its line ending. Bytes past the line
    /// buffer are discarded and the line is flagged as truncated. `None`
    /// means the peer closed before sending anything.
    fn read_head_line(&mut self, budget: &mut usize) -> Result<Option<(HeadLine, bool)>, Error> {
        let mut line = HeadLine::new();
        let mut truncated = false;
        let mut started = false;
        loop {
            let b = match self.read_byte()? {
                Some(b) => b,
                None if !started => return Ok(None),
                None => return Err(Error::ProtocolError),
            };
            started = true;
            *budget = budget.checked_sub(1).ok_or(Error::ProtocolError)?;
            if b == b'\n' {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some((line, truncated)));
            }
            if line.push(b).is_err() {
                truncated = true;
            }
        }
    }

    /// Returns a scoped reader over the response body.
    ///
    /// Once a reader has been released the body counts as consumed and this
    /// fails with [`Error::ConnectionClosed`].
    pub fn input_stream(&mut self) -> Result<HttpInputStream<'_, C, B>, Error> {
        if !self.do_input {
            return Err(Error::ProtocolError);
        }
        self.receive_head()?;
        if self.body == Body::Consumed {
            return Err(Error::ConnectionClosed);
        }
        Ok(HttpInputStream::new(self))
    }

    pub(super) fn read_body(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.body {
            Body::Empty => Ok(0),
            Body::Consumed => Err(Error::ConnectionClosed),
            Body::UntilClose => self.read_raw(buf),
            Body::Length(0) => Ok(0),
            Body::Length(remaining) => {
                let limit = remaining.min(buf.len());
                let n = self.read_raw(&mut buf[..limit])?;
                if n == 0 {
                    // Prematurely closed
                    return Err(Error::ConnectionClosed);
                }
                self.body = Body::Length(remaining - n);
                Ok(n)
            }
            Body::Chunked(mut remaining) => {
                if remaining == 0 {
                    remaining = self.read_chunk_size()?;
                    if remaining == 0 {
                        self.skip_trailers()?;
                        self.body = Body::Empty;
                        return Ok(0);
                    }
                }
                let limit = remaining.min(buf.len());
                let n = self.read_raw(&mut buf[..limit])?;
                if n == 0 {
                    return Err(Error::ConnectionClosed);
                }
                remaining -= n;
                if remaining == 0 {
                    self.expect_empty_line()?;
                }
                self.body = Body::Chunked(remaining);
                Ok(n)
            }
        }
    }

    fn read_chunk_size(&mut self) -> Result<usize, Error> {
        let line = self.read_line()?;
        let size = line.split(';').next().unwrap_or("").trim();
        usize::from_str_radix(size, 16).map_err(|_| Error::ProtocolError)
    }

    fn skip_trailers(&mut self) -> Result<(), Error> {
        while !self.read_line()?.is_empty() {}
        Ok(())
    }

    fn expect_empty_line(&mut self) -> Result<(), Error> {
        if self.read_line()?.is_empty() {
            Ok(())
        } else {
            Err(Error::ProtocolError)
        }
    }

    fn read_line(&mut self) -> Result<String<MAX_LINE_LEN>, Error> {
        let mut line: String<MAX_LINE_LEN> = String::new();
        loop {
            match self.read_byte()? {
                None => return Err(Error::ConnectionClosed),
                Some(b'\n') => return Ok(line),
                Some(b'\r') => {}
                Some(b) => line.push(b as char).map_err(|_| Error::ProtocolError)?,
            }
        }
    }

    /// Reads from the receive buffer first, then straight from the connection.
    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.rx_pos < self.rx_len {
            let n = (self.rx_len - self.rx_pos).min(buf.len());
            buf[..n].copy_from_slice(&self.rx[self.rx_pos..self.rx_pos + n]);
            self.rx_pos += n;
            return Ok(n);
        }
        self.connection.read(buf).map_err(|_| Error::ReadError)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.rx_pos == self.rx_len {
            self.rx_pos = 0;
            self.rx_len = self
                .connection
                .read(&mut self.rx)
                .map_err(|_| Error::ReadError)?;
            if self.rx_len == 0 {
                return Ok(None);
            }
        }
        let b = self.rx[self.rx_pos];
        self.rx_pos += 1;
        Ok(Some(b))
    }

    /// Releases the underlying connection.
    pub fn disconnect(self) -> Result<(), Error> {
        trace!("closing connection to {}", self.url.host.as_str());
        self.connection.close().map_err(|_| Error::NotOpen)
    }
}

fn write_all<C: Connection>(connection: &mut C, mut buf: &[u8]) -> Result<(), Error> {
    while !buf.is_empty() {
        match connection.write(buf) {
            Ok(0) => return Err(Error::WriteError),
            Ok(n) => buf = &buf[n..],
            Err(_) => return Err(Error::WriteError),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_line_and_headers() {
        let head = ResponseHead::parse(
            b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\ncontent-length: 9\r\n\r\n",
        )
        .unwrap();
        assert_eq!(head.status_code, 404);
        assert_eq!(head.reason.as_str(), "Not Found");
        assert_eq!(head.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(head.content_length, Some(9));
        assert_eq!(head.body_framing(), Body::Length(9));
    }

    #[test]
    fn missing_reason_is_empty() {
        let head = ResponseHead::parse(b"HTTP/1.1 200\r\n\r\n").unwrap();
        assert_eq!(head.status_code, 200);
        assert!(head.reason.is_empty());
        assert_eq!(head.body_framing(), Body::UntilClose);
    }

    #[test]
    fn chunked_overrides_content_length() {
        let head = ResponseHead::parse(
            b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\nTransfer-Encoding: gzip, chunked\r\n\r\n",
        )
        .unwrap();
        assert_eq!(head.content_length, None);
        assert_eq!(head.body_framing(), Body::Chunked(0));
    }

    #[test]
    fn no_content_has_no_body() {
        let head = ResponseHead::parse(b"HTTP/1.1 204 No Content\r\nContent-Length: 5\r\n\r\n")
            .unwrap();
        assert_eq!(head.body_framing(), Body::Empty);
    }

    #[test]
    fn long_reason_is_truncated() {
        let mut raw = std::vec::Vec::from(&b"HTTP/1.1 500 "[..]);
        raw.extend(core::iter::repeat_n(b'x', 100));
        raw.extend_from_slice(b"\r\n\r\n");
        let head = ResponseHead::parse(&raw).unwrap();
        assert_eq!(head.reason.len(), MAX_REASON_LEN);
    }

    #[test]
    fn excess_headers_are_dropped_but_framing_kept() {
        let mut raw = std::string::String::from("HTTP/1.1 200 OK\r\n");
        for i in 0..MAX_HEADERS + 4 {
            raw.push_str(&std::format!("X-Filler-{i}: v\r\n"));
        }
        raw.push_str("Content-Length: 3\r\n\r\n");
        let head = ResponseHead::parse(raw.as_bytes()).unwrap();
        assert_eq!(head.headers.len(), MAX_HEADERS);
        assert_eq!(head.content_length, Some(3));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            ResponseHead::parse(b"SIP/2.0 200 OK\r\n\r\n"),
            Err(Error::ProtocolError)
        );
        assert_eq!(
            ResponseHead::parse(b"HTTP/1.1 abc OK\r\n\r\n"),
            Err(Error::ProtocolError)
        );
        assert_eq!(
            ResponseHead::parse(b"HTTP/1.1 200 OK\r\nbroken header\r\n\r\n"),
            Err(Error::ProtocolError)
        );
        assert_eq!(
            ResponseHead::parse(b"HTTP/1.1 200 OK\r\nContent-Length: -1\r\n\r\n"),
            Err(Error::ProtocolError)
        );
    }

    #[test]
    fn latin1_reason_and_values_are_decoded() {
        let head = ResponseHead::parse(
            b"HTTP/1.1 404 Nicht gefunden \xfc\r\nX-City: K\xf6ln\r\n\r\n",
        )
        .unwrap();
        assert_eq!(head.status_code, 404);
        assert_eq!(head.reason.as_str(), "Nicht gefunden \u{fc}");
        assert_eq!(head.header("x-city"), Some("K\u{f6}ln"));
    }

    #[test]
    fn unusable_headers_are_skipped() {
        let mut raw = std::vec::Vec::from(&b"HTTP/1.1 200 OK\r\nX-\xff: bad name\r\n"[..]);
        raw.extend_from_slice(b"X-Big: ");
        raw.extend(core::iter::repeat_n(b'v', MAX_HEADER_VALUE_LEN + 1));
        raw.extend_from_slice(b"\r\nContent-Length: 1\r\n\r\nx");
        let head = ResponseHead::parse(&raw).unwrap();
        assert_eq!(head.headers.len(), 1);
        assert_eq!(head.header("X-Big"), None);
        assert_eq!(head.content_length, Some(1));
    }

    #[test]
    fn header_rejects_line_breaks() {
        assert_eq!(Header::new("X-A", "a\r\nb"), Err(Error::ProtocolError));
        assert_eq!(Header::new("", "v"), Err(Error::ProtocolError));
        assert!(Header::new("SOAPAction", "\"urn:echo\"").is_ok());
    }
}
