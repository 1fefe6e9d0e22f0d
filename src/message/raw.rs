use super::WebServiceMessage;
use crate::network::error::Error;
use crate::transport::TransportOutput;

/// A pre-serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage<'a> {
    payload: &'a [u8],
    content_type: Option<&'a str>,
    soap_action: Option<&'a str>,
}

impl<'a> RawMessage<'a> {
    /// Wraps `payload` without any transport headers.
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            content_type: None,
            soap_action: None,
        }
    }

    /// Sends a `Content-Type` header with the payload.
    pub fn with_content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sends a `SOAPAction` header with the payload. The value is quoted as
    /// SOAP 1.1 requires.
    pub fn with_soap_action(mut self, action: &'a str) -> Self {
        self.soap_action = Some(action);
        self
    }

    /// The bytes written as the request body.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

impl WebServiceMessage for RawMessage<'_> {
    fn write_to<O: TransportOutput>(&self, out: &mut O) -> Result<(), Error> {
        if let Some(content_type) = self.content_type {
            out.add_header("Content-Type", content_type)?;
        }
        if let Some(action) = self.soap_action {
            let mut quoted: heapless::String<258> = heapless::String::new();
            quoted.push('"').map_err(|_| Error::BufferOverflow)?;
            quoted.push_str(action).map_err(|_| Error::BufferOverflow)?;
            quoted.push('"').map_err(|_| Error::BufferOverflow)?;
            out.add_header("SOAPAction", &quoted)?;
        }
        out.write_all(self.payload)?;
        out.flush()
    }
}
