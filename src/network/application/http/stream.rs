//! Scoped request and response body streams.

use super::connection::{Body, DEFAULT_REQUEST_BODY_LEN, HttpConnection};
use crate::network::error::Error;
use crate::network::{Connection, Read, Write};
use crate::transport::{TransportInput, TransportOutput};

/// Writer over the buffered request body of an [`HttpConnection`].
///
/// It mutably borrows the connection, so it is released before the connection
/// can be used again. [`close`](Self::close) transmits the request; dropping
/// the stream without closing leaves transmission to the first response
/// accessor.
#[derive(Debug)]
pub struct HttpOutputStream<'c, C: Connection, const B: usize = DEFAULT_REQUEST_BODY_LEN> {
    connection: &'c mut HttpConnection<C, B>,
}

impl<'c, C: Connection, const B: usize> HttpOutputStream<'c, C, B> {
    pub(super) fn new(connection: &'c mut HttpConnection<C, B>) -> Self {
        Self { connection }
    }

    /// Finishes the body and transmits the request.
    pub fn close(self) -> Result<(), Error> {
        self.connection.send_request()
    }
}

impl<C: Connection, const B: usize> Write for HttpOutputStream<'_, C, B> {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.connection.write_body(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Nothing leaves the buffer before close
        Ok(())
    }
}

impl<C: Connection, const B: usize> TransportOutput for HttpOutputStream<'_, C, B> {
    fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.connection.add_request_header(name, value)
    }
}

/// Reader over the response body of an [`HttpConnection`].
///
/// Dropping or closing the stream marks the body as consumed.
#[derive(Debug)]
pub struct HttpInputStream<'c, C: Connection, const B: usize = DEFAULT_REQUEST_BODY_LEN> {
    connection: &'c mut HttpConnection<C, B>,
}

impl<'c, C: Connection, const B: usize> HttpInputStream<'c, C, B> {
    pub(super) fn new(connection: &'c mut HttpConnection<C, B>) -> Self {
        Self { connection }
    }

    /// Releases the reader.
    pub fn close(self) {}
}

impl<C: Connection, const B: usize> Drop for HttpInputStream<'_, C, B> {
    fn drop(&mut self) {
        self.connection.body = Body::Consumed;
    }
}

impl<C: Connection, const B: usize> Read for HttpInputStream<'_, C, B> {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.connection.read_body(buf)
    }
}

impl<C: Connection, const B: usize> TransportInput for HttpInputStream<'_, C, B> {
    fn status_code(&self) -> u16 {
        self.connection
            .response
            .as_ref()
            .map_or(0, |head| head.status_code)
    }

    fn reason(&self) -> &str {
        self.connection
            .response
            .as_ref()
            .map_or("", |head| head.reason.as_str())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.connection
            .response
            .as_ref()
            .and_then(|head| head.header(name))
    }
}
