//! Errors surfaced by [`HttpMessageSender`](super::HttpMessageSender).

use super::connection::MAX_REASON_LEN;
use super::truncated;
use crate::network::error::Error;
use core::fmt;
use heapless::String;

/// The outcome of a failed send-and-receive call.
///
/// Each variant names the phase that failed, so callers can tell a
/// destination problem from a write, status or read problem without
/// inspecting the underlying I/O error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The destination could not be opened as an HTTP connection.
    Connection(Error),
    /// Configuring the connection or writing the request failed.
    Write(Error),
    /// The server answered with a status outside the accepted set.
    UnsuccessfulResponse {
        /// Status code, verbatim.
        code: u16,
        /// Reason phrase, verbatim up to [`MAX_REASON_LEN`] characters.
        reason: String<MAX_REASON_LEN>,
    },
    /// Reading the response into the message context failed.
    Read(Error),
}

/// Payload-free discriminant of [`SendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`SendError::Connection`].
    Connection,
    /// See [`SendError::Write`].
    Write,
    /// See [`SendError::UnsuccessfulResponse`].
    UnsuccessfulResponse,
    /// See [`SendError::Read`].
    Read,
}

impl SendError {
    /// Builds an [`SendError::UnsuccessfulResponse`], truncating long reasons.
    pub fn unsuccessful(code: u16, reason: &str) -> Self {
        SendError::UnsuccessfulResponse {
            code,
            reason: truncated(reason),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SendError::Connection(_) => ErrorKind::Connection,
            SendError::Write(_) => ErrorKind::Write,
            SendError::UnsuccessfulResponse { .. } => ErrorKind::UnsuccessfulResponse,
            SendError::Read(_) => ErrorKind::Read,
        }
    }

    /// The underlying I/O error, if the failure was not a status rejection.
    pub fn io_error(&self) -> Option<Error> {
        match self {
            SendError::Connection(e) | SendError::Write(e) | SendError::Read(e) => Some(*e),
            SendError::UnsuccessfulResponse { .. } => None,
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Connection(e) => write!(f, "could not open HTTP connection: {}", e),
            SendError::Write(e) => write!(f, "could not write request: {}", e),
            SendError::UnsuccessfulResponse { code, reason } => write!(
                f,
                "did not receive successful HTTP response: status code = {}, status message = [{}]",
                code, reason
            ),
            SendError::Read(e) => write!(f, "could not read response: {}", e),
        }
    }
}

impl core::error::Error for SendError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SendError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SendError::Connection(e) => defmt::write!(f, "Connection({})", e),
            SendError::Write(e) => defmt::write!(f, "Write({})", e),
            SendError::UnsuccessfulResponse { code, reason } => {
                defmt::write!(f, "UnsuccessfulResponse({}, {})", code, reason.as_str())
            }
            SendError::Read(e) => defmt::write!(f, "Read({})", e),
        }
    }
}
