//! HTTP/1.1 message transport for embedded systems.
//!
//! This module sends a message with a single blocking POST exchange and reads
//! the reply back into a message context. It is built for `no_std` targets:
//! every buffer is a fixed-size `heapless` collection, and the socket itself
//! comes from any [`Connect`](crate::network::Connect) implementation.
//!
//! # Features
//!
//! - One fresh connection per exchange, always released afterwards
//! - Request bodies buffered so `Content-Length` is exact
//! - `Content-Length`, chunked and close-delimited response bodies
//! - Status handling that lets fault bodies (`500`) through to the caller
//! - Phase hooks for customizing single steps of the exchange
//!
//! # Usage
//!
//! ```rust,no_run
//! use libpost::message::{BufferedContext, RawMessage};
//! use libpost::network::application::http::{HttpMessageSender, Options};
//! # use libpost::network::{Close, Connect, Connection, Read, Write};
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockNetwork;
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     type Error = libpost::network::error::Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, Self::Error> { Ok(MockConnection) }
//! # }
//!
//! let mut sender = HttpMessageSender::new(MockNetwork, Options::new("http://192.168.1.10/ws"));
//!
//! let request = RawMessage::new(b"<Envelope/>").with_content_type("text/xml");
//! let mut context: BufferedContext<'_, _> = BufferedContext::new(&request);
//!
//! sender.send_and_receive(&mut context)?;
//! if let Some(response) = context.response() {
//!     // response.status_code, response.body ...
//! }
//! # Ok::<(), libpost::network::application::http::SendError>(())
//! ```

pub mod connection;
pub mod error;
pub mod options;
pub mod sender;
pub mod stream;
pub mod url;

pub use connection::{DEFAULT_REQUEST_BODY_LEN, Header, HttpConnection, Method, ResponseHead};
pub use error::{ErrorKind, SendError};
pub use options::Options;
pub use sender::{DefaultPhases, HttpMessageSender, Phases, State};
pub use stream::{HttpInputStream, HttpOutputStream};
pub use url::{Scheme, Url};

use heapless::String;

/// Copies as much of `s` as fits into a bounded string, on a char boundary.
pub(crate) fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Appends ISO-8859-1 `bytes` to `out` until it is full. Returns whether
/// everything fit.
pub(crate) fn push_latin1<const N: usize>(out: &mut String<N>, bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| out.push(char::from(b)).is_ok())
}
