use super::WebServiceMessage;
use crate::network::error::Error;
use crate::transport::TransportOutput;
use serde::Serialize;

/// Default serialization buffer for [`JsonMessage`].
pub const DEFAULT_JSON_BUFFER_LEN: usize = 1024;

/// A value serialized as a JSON request body.
///
/// `N` bounds the serialized size; a value that does not fit fails the write
/// phase with [`Error::BufferOverflow`].
#[derive(Debug)]
pub struct JsonMessage<'a, T: Serialize, const N: usize = DEFAULT_JSON_BUFFER_LEN> {
    value: &'a T,
}

impl<'a, T: Serialize, const N: usize> JsonMessage<'a, T, N> {
    /// Borrows `value` for serialization at write time.
    pub fn new(value: &'a T) -> Self {
        Self { value }
    }

    /// The value being sent.
    pub fn value(&self) -> &'a T {
        self.value
    }
}

impl<T: Serialize, const N: usize> WebServiceMessage for JsonMessage<'_, T, N> {
    fn write_to<O: TransportOutput>(&self, out: &mut O) -> Result<(), Error> {
        let body: heapless::Vec<u8, N> =
            serde_json_core::to_vec(self.value).map_err(|_| Error::BufferOverflow)?;
        out.add_header("Content-Type", "application/json")?;
        out.write_all(&body)?;
        out.flush()
    }
}
