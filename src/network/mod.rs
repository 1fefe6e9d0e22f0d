//! A blocking network abstraction layer
//!
//! This module provides the small set of traits the HTTP transport is built on:
//! a byte-oriented connection that can be read, written and closed, and a
//! connector that resolves a remote address into such a connection. Any
//! platform (a TCP socket, a modem AT-command stack, an in-memory fake) can
//! drive the message sender by implementing them.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocols built on top of [`Connection`]
pub mod application;

/// `std::net` backed connector
#[cfg(feature = "std")]
pub mod tcp;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection
    ///
    /// Returns `Ok(0)` once the peer has finished sending.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client)
///
/// This is the destination resolver of the HTTP transport: it receives an
/// authority in `host:port` form and hands back a freshly opened connection.
/// Its errors convert into [`error::Error`] so the cause of a failed connect
/// reaches the caller.
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Open a connection
    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error>;
}

impl<T: Connect + ?Sized> Connect for &mut T {
    type Connection = T::Connection;
    type Error = T::Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        (**self).connect(remote)
    }
}
