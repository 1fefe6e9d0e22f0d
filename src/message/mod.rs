//! Messages and message contexts.
//!
//! The sender treats a request as opaque: a [`WebServiceMessage`] knows how to
//! write itself onto a [`TransportOutput`], and a [`MessageContext`] knows how
//! to absorb whatever comes back on a [`TransportInput`]. The context is the
//! correlation point of one call, holding the request going out and the
//! response coming in.
//!
//! # Example
//!
//! ```rust
//! use libpost::message::{BufferedContext, MessageContext, RawMessage};
//!
//! let request = RawMessage::new(b"<ping/>").with_content_type("text/xml; charset=utf-8");
//! let context: BufferedContext<'_, _> = BufferedContext::new(&request);
//! assert!(context.response().is_none());
//! assert_eq!(context.request().payload(), b"<ping/>");
//! ```

use crate::network::error::Error;
use crate::transport::{TransportInput, TransportOutput};

mod context;
mod json;
mod raw;

pub use context::{BufferedContext, DEFAULT_RESPONSE_BUFFER_LEN, Response};
pub use json::{DEFAULT_JSON_BUFFER_LEN, JsonMessage};
pub use raw::RawMessage;

/// An outgoing message that can serialize itself.
pub trait WebServiceMessage {
    /// Writes the message, and any transport headers it needs, onto `out`.
    fn write_to<O: TransportOutput>(&self, out: &mut O) -> Result<(), Error>;
}

impl<M: WebServiceMessage + ?Sized> WebServiceMessage for &M {
    fn write_to<O: TransportOutput>(&self, out: &mut O) -> Result<(), Error> {
        (**self).write_to(out)
    }
}

/// Holds the request of one call and accepts its response.
pub trait MessageContext {
    /// The outgoing message type.
    type Request: WebServiceMessage;

    /// The message to send.
    fn request(&self) -> &Self::Request;

    /// Consumes the response body.
    ///
    /// Not called at all when the response carries no body.
    fn read_response<I: TransportInput>(&mut self, input: &mut I) -> Result<(), Error>;
}
