use super::{MessageContext, WebServiceMessage};
use crate::network::error::Error;
use crate::transport::TransportInput;
use heapless::{String, Vec};
use serde::Deserialize;

/// Default response body capacity of [`BufferedContext`].
pub const DEFAULT_RESPONSE_BUFFER_LEN: usize = 2048;

const MAX_CONTENT_TYPE_LEN: usize = 128;

/// A response captured by [`BufferedContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<const N: usize = DEFAULT_RESPONSE_BUFFER_LEN> {
    /// Status code the body was delivered with; `500` marks a fault body.
    pub status_code: u16,
    /// The `Content-Type` header, if it was sent and fits.
    pub content_type: Option<String<MAX_CONTENT_TYPE_LEN>>,
    /// The complete response body.
    pub body: Vec<u8, N>,
}

impl<const N: usize> Response<N> {
    /// True when the server reported a fault alongside the body.
    pub fn is_fault(&self) -> bool {
        self.status_code == 500
    }

    /// The body as UTF-8 text.
    pub fn body_str(&self) -> Result<&str, Error> {
        core::str::from_utf8(&self.body).map_err(|_| Error::ProtocolError)
    }

    /// Deserializes a JSON body.
    pub fn json<'de, T: Deserialize<'de>>(&'de self) -> Result<T, Error> {
        serde_json_core::from_slice(&self.body)
            .map(|(value, _)| value)
            .map_err(|_| Error::ProtocolError)
    }
}

/// A [`MessageContext`] that buffers up to `N` response bytes.
#[derive(Debug)]
pub struct BufferedContext<'m, M, const N: usize = DEFAULT_RESPONSE_BUFFER_LEN> {
    request: &'m M,
    response: Option<Response<N>>,
}

impl<'m, M: WebServiceMessage, const N: usize> BufferedContext<'m, M, N> {
    /// A context for sending `request`, with no response yet.
    pub fn new(request: &'m M) -> Self {
        Self {
            request,
            response: None,
        }
    }

    /// The received response; `None` when nothing was read, including
    /// exchanges that legitimately carried no body.
    pub fn response(&self) -> Option<&Response<N>> {
        self.response.as_ref()
    }

    /// Moves the received response out of the context.
    pub fn take_response(&mut self) -> Option<Response<N>> {
        self.response.take()
    }
}

impl<M: WebServiceMessage, const N: usize> MessageContext for BufferedContext<'_, M, N> {
    type Request = M;

    fn request(&self) -> &M {
        self.request
    }

    fn read_response<I: TransportInput>(&mut self, input: &mut I) -> Result<(), Error> {
        let mut body = Vec::new();
        input.read_to_end(&mut body)?;
        let content_type = input
            .header("Content-Type")
            .and_then(|value| String::try_from(value).ok());
        self.response = Some(Response {
            status_code: input.status_code(),
            content_type,
            body,
        });
        Ok(())
    }
}
