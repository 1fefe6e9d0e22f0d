//! Mock connector and connection shared by the integration tests.

#![allow(dead_code)]

use libpost::message::{MessageContext, WebServiceMessage};
use libpost::network::error::Error;
use libpost::network::*;
use libpost::transport::{TransportInput, TransportOutput};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Open/close bookkeeping shared between a network and its connections.
#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub opened: Rc<Cell<usize>>,
    pub closed: Rc<Cell<usize>>,
}

impl Counters {
    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

#[derive(Debug)]
pub struct MockConnection {
    response: Vec<u8>,
    read_pos: usize,
    max_read: usize,
    written: Rc<RefCell<Vec<u8>>>,
    closed: Rc<Cell<usize>>,
    fail_write: bool,
    fail_close: bool,
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.response.len() - self.read_pos;
        let len = buf.len().min(remaining).min(self.max_read);
        buf[..len].copy_from_slice(&self.response[self.read_pos..self.read_pos + len]);
        self.read_pos += len;
        Ok(len)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_write {
            return Err(Error::WriteError);
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_write {
            return Err(Error::WriteError);
        }
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.closed.set(self.closed.get() + 1);
        if self.fail_close {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Connection for MockConnection {}

/// A connector that hands out connections replaying one canned response.
#[derive(Debug)]
pub struct MockNetwork {
    pub response: Vec<u8>,
    pub counters: Counters,
    pub written: Rc<RefCell<Vec<u8>>>,
    pub remotes: Vec<String>,
    pub max_read: usize,
    /// Returned by `connect` instead of a connection.
    pub connect_error: Option<Error>,
    pub fail_write: bool,
    pub fail_close: bool,
}

impl MockNetwork {
    pub fn replying(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            counters: Counters::default(),
            written: Rc::new(RefCell::new(Vec::new())),
            remotes: Vec::new(),
            max_read: usize::MAX,
            connect_error: None,
            fail_write: false,
            fail_close: false,
        }
    }

    /// Deliver at most `n` bytes per read call.
    pub fn trickle(mut self, n: usize) -> Self {
        self.max_read = n;
        self
    }

    /// Everything the client has sent so far, lossily decoded.
    pub fn request_text(&self) -> String {
        String::from_utf8_lossy(&self.written.borrow()).into_owned()
    }

    pub fn request_body(&self) -> Vec<u8> {
        let written = self.written.borrow();
        match written.windows(4).position(|w| w == b"\r\n\r\n") {
            Some(pos) => written[pos + 4..].to_vec(),
            None => Vec::new(),
        }
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        if let Some(e) = self.connect_error {
            return Err(e);
        }
        self.counters.opened.set(self.counters.opened.get() + 1);
        self.remotes.push(remote.to_string());
        Ok(MockConnection {
            response: self.response.clone(),
            read_pos: 0,
            max_read: self.max_read.max(1),
            written: self.written.clone(),
            closed: self.counters.closed.clone(),
            fail_write: self.fail_write,
            fail_close: self.fail_close,
        })
    }
}

/// Builds a response with an exact `Content-Length`.
pub fn http_response(status: u16, reason: &str, body: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    out.extend_from_slice(body);
    out
}

/// A message that writes part of itself, then fails to serialize.
#[derive(Debug)]
pub struct FailingMessage;

impl WebServiceMessage for FailingMessage {
    fn write_to<O: TransportOutput>(&self, out: &mut O) -> Result<(), Error> {
        out.write_all(b"<Envelope><Body>")?;
        Err(Error::ProtocolError)
    }
}

/// Records every invocation of the response-reading hook.
#[derive(Debug)]
pub struct RecordingContext<M> {
    pub request: M,
    pub invocations: usize,
    pub status: Option<u16>,
    pub body: Vec<u8>,
    pub fail_read: bool,
}

impl<M> RecordingContext<M> {
    pub fn new(request: M) -> Self {
        Self {
            request,
            invocations: 0,
            status: None,
            body: Vec::new(),
            fail_read: false,
        }
    }
}

impl<M: WebServiceMessage> MessageContext for RecordingContext<M> {
    type Request = M;

    fn request(&self) -> &M {
        &self.request
    }

    fn read_response<I: TransportInput>(&mut self, input: &mut I) -> Result<(), Error> {
        self.invocations += 1;
        self.status = Some(input.status_code());
        if self.fail_read {
            return Err(Error::ReadError);
        }
        let mut chunk = [0u8; 7];
        loop {
            match input.read(&mut chunk)? {
                0 => return Ok(()),
                n => self.body.extend_from_slice(&chunk[..n]),
            }
        }
    }
}
