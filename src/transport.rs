//! Byte streams a message is written to and a response is read from.
//!
//! Messages and message contexts never see the HTTP connection itself. They
//! receive a scoped [`TransportOutput`] or [`TransportInput`] that is tied to
//! one exchange and released by the sender when the phase ends.

use crate::network::error::Error;
use crate::network::{Read, Write};
use heapless::Vec;

/// The request side of an exchange.
pub trait TransportOutput: Write<Error = Error> {
    /// Adds a transport header (for example `Content-Type` or `SOAPAction`)
    /// to the outgoing request. Must be called before the body is transmitted.
    fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error>;

    /// Writes the whole buffer, retrying short writes.
    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), Error> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(Error::WriteError),
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }
}

/// The response side of an exchange.
pub trait TransportInput: Read<Error = Error> {
    /// Status code of the response being read.
    fn status_code(&self) -> u16;

    /// Reason phrase sent with the status code.
    fn reason(&self) -> &str;

    /// Case-insensitive response header lookup.
    fn header(&self, name: &str) -> Option<&str>;

    /// Reads until the end of the body, appending to `out`.
    ///
    /// Returns the number of bytes appended, or [`Error::BufferOverflow`] if
    /// the body does not fit.
    fn read_to_end<const N: usize>(&mut self, out: &mut Vec<u8, N>) -> Result<usize, Error> {
        let start = out.len();
        let mut chunk = [0u8; 256];
        loop {
            match self.read(&mut chunk)? {
                0 => return Ok(out.len() - start),
                n => out
                    .extend_from_slice(&chunk[..n])
                    .map_err(|_| Error::BufferOverflow)?,
            }
        }
    }
}
