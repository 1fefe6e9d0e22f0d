//! TCP connector backed by `std::net`.

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};
use std::io::{ErrorKind, Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Opens plain TCP connections with optional socket timeouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector {
    /// Applied to every read; `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
    /// Applied to every write; `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
}

impl TcpConnector {
    /// A connector applying the same timeout to reads and writes.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            read_timeout: Some(timeout),
            write_timeout: Some(timeout),
        }
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let stream = TcpStream::connect(remote).map_err(|e| match e.kind() {
            ErrorKind::ConnectionRefused => Error::ConnectionRefused,
            ErrorKind::TimedOut => Error::Timeout,
            _ => Error::InvalidAddress,
        })?;
        stream
            .set_read_timeout(self.read_timeout)
            .map_err(|_| Error::InvalidAddress)?;
        stream
            .set_write_timeout(self.write_timeout)
            .map_err(|_| Error::InvalidAddress)?;
        Ok(TcpConnection { stream })
    }
}

/// A connected TCP stream.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

fn is_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

impl Read for TcpConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| {
            if is_timeout(e.kind()) {
                Error::Timeout
            } else {
                Error::ReadError
            }
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|e| {
            if is_timeout(e.kind()) {
                Error::Timeout
            } else {
                Error::WriteError
            }
        })
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        match self.stream.shutdown(Shutdown::Both) {
            // The peer may have closed first
            Err(e) if e.kind() != ErrorKind::NotConnected => Err(Error::NotOpen),
            _ => Ok(()),
        }
    }
}

impl Connection for TcpConnection {}
