//! Single-exchange message sender over HTTP POST.
//!
//! [`HttpMessageSender::send_and_receive`] runs one fixed sequence per call:
//! open a fresh connection, configure it, write the request message, validate
//! the status, read the response into the message context, and release the
//! connection. Each step is a [`Phases`] method whose default body calls the
//! free function of the same name in this module, so a custom transport can
//! replace one step and keep the rest.

use super::connection::{DEFAULT_REQUEST_BODY_LEN, HttpConnection, Method};
use super::error::SendError;
use super::options::Options;
use super::url::{Scheme, Url};
use crate::message::{MessageContext, WebServiceMessage};
use crate::network::error::Error;
use crate::network::{Connect, Connection, Write};

/// `204 No Content`
pub const HTTP_NO_CONTENT: u16 = 204;
/// `500 Internal Server Error`
///
/// Accepted as a successful exchange: SOAP and similar stacks deliver their
/// fault payload with this status, and it must reach the message context.
pub const HTTP_INTERNAL_ERROR: u16 = 500;

/// Where a sender is in its current (or last) exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No exchange has been attempted yet.
    Idle,
    /// Resolving the destination and opening the connection.
    Connecting,
    /// Configuring, writing, validating and reading.
    Exchanging,
    /// The last exchange ended, successfully or not, and its connection is released.
    Closed,
}

/// Overridable steps of an exchange.
///
/// Every method defaults to the free function of the same name. Implement the
/// trait on your own type and override only what differs. `B` is the request
/// body capacity chosen by the sender:
///
/// ```rust
/// use libpost::network::application::http::{sender, HttpConnection, Phases, SendError};
/// use libpost::network::Connection;
///
/// /// Accepts 202 Accepted only.
/// struct StrictPhases;
///
/// impl Phases for StrictPhases {
///     fn validate_response<C: Connection, const B: usize>(
///         &mut self,
///         connection: &mut HttpConnection<C, B>,
///     ) -> Result<(), SendError> {
///         sender::validate_response(connection)?;
///         match connection.response_code() {
///             Ok(202) => Ok(()),
///             Ok(code) => Err(SendError::unsuccessful(code, "expected 202")),
///             Err(e) => Err(SendError::Read(e)),
///         }
///     }
/// }
/// ```
pub trait Phases {
    fn open_connection<N: Connect, const B: usize>(
        &mut self,
        connector: &mut N,
        options: &Options<'_>,
    ) -> Result<HttpConnection<N::Connection, B>, SendError> {
        open_connection(connector, options)
    }

    fn prepare_connection<C: Connection, const B: usize>(
        &mut self,
        connection: &mut HttpConnection<C, B>,
        options: &Options<'_>,
    ) -> Result<(), SendError> {
        prepare_connection(connection, options)
    }

    fn write_request_message<C: Connection, M: WebServiceMessage, const B: usize>(
        &mut self,
        connection: &mut HttpConnection<C, B>,
        message: &M,
    ) -> Result<(), SendError> {
        write_request_message(connection, message)
    }

    fn validate_response<C: Connection, const B: usize>(
        &mut self,
        connection: &mut HttpConnection<C, B>,
    ) -> Result<(), SendError> {
        validate_response(connection)
    }

    fn read_response<C: Connection, X: MessageContext, const B: usize>(
        &mut self,
        connection: &mut HttpConnection<C, B>,
        context: &mut X,
    ) -> Result<(), SendError> {
        read_response(connection, context)
    }
}

/// The stock steps, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPhases;

impl Phases for DefaultPhases {}

/// Sends messages to one fixed destination, one blocking exchange per call.
///
/// Nothing is shared between calls: every call opens its own connection
/// through the connector and releases it before returning. Request bodies are
/// buffered in `B` bytes; pick a larger `B` through
/// [`with_request_capacity`](Self::with_request_capacity).
#[derive(Debug)]
pub struct HttpMessageSender<
    'a,
    N: Connect,
    P: Phases = DefaultPhases,
    const B: usize = DEFAULT_REQUEST_BODY_LEN,
> {
    connector: N,
    options: Options<'a>,
    phases: P,
    state: State,
}

impl<'a, N: Connect> HttpMessageSender<'a, N> {
    pub fn new(connector: N, options: Options<'a>) -> Self {
        Self::with_phases(connector, options, DefaultPhases)
    }
}

impl<'a, N: Connect, P: Phases> HttpMessageSender<'a, N, P> {
    pub fn with_phases(connector: N, options: Options<'a>, phases: P) -> Self {
        Self::with_request_capacity(connector, options, phases)
    }
}

impl<'a, N: Connect, P: Phases, const B: usize> HttpMessageSender<'a, N, P, B> {
    /// Like [`with_phases`](HttpMessageSender::with_phases), for a sender whose
    /// request bodies may be up to `B` bytes. `B` comes from the sender's type,
    /// for example `HttpMessageSender<'_, _, DefaultPhases, 16384>`.
    pub fn with_request_capacity(connector: N, options: Options<'a>, phases: P) -> Self {
        Self {
            connector,
            options,
            phases,
            state: State::Idle,
        }
    }

    pub fn options(&self) -> &Options<'a> {
        &self.options
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn connector(&self) -> &N {
        &self.connector
    }

    pub fn phases(&self) -> &P {
        &self.phases
    }

    /// Whether this transport can reach `url`.
    pub fn supports(&self, url: &str) -> bool {
        supports(url)
    }

    /// Sends the context's request and delivers the response back into it.
    ///
    /// The connection is released on every path. If releasing fails after an
    /// earlier step already failed, the earlier error is returned; a release
    /// failure on its own is logged and does not fail the call, since the
    /// response has been delivered by then.
    pub fn send_and_receive<X: MessageContext>(&mut self, context: &mut X) -> Result<(), SendError> {
        self.state = State::Connecting;
        let mut connection: HttpConnection<N::Connection, B> = match self
            .phases
            .open_connection(&mut self.connector, &self.options)
        {
            Ok(connection) => connection,
            Err(e) => {
                self.state = State::Closed;
                return Err(e);
            }
        };

        self.state = State::Exchanging;
        let result = self.exchange(&mut connection, context);

        let released = connection.disconnect();
        self.state = State::Closed;
        if let Err(close_err) = released {
            warn!("failed to release connection: {}", close_err);
        }
        result
    }

    fn exchange<C: Connection, X: MessageContext>(
        &mut self,
        connection: &mut HttpConnection<C, B>,
        context: &mut X,
    ) -> Result<(), SendError> {
        self.phases.prepare_connection(connection, &self.options)?;
        self.phases
            .write_request_message(connection, context.request())?;
        self.phases.validate_response(connection)?;
        self.phases.read_response(connection, context)
    }
}

/// Whether `url` parses as an `http` URL.
pub fn supports(url: &str) -> bool {
    Url::parse(url).is_ok_and(|url| url.scheme == Scheme::Http)
}

/// Whether a status code counts as a completed exchange: any `2xx`, or `500`.
pub fn is_accepted(code: u16) -> bool {
    code == HTTP_INTERNAL_ERROR || code / 100 == 2
}

/// Resolves the configured URL and opens a connection to it.
pub fn open_connection<N: Connect, const B: usize>(
    connector: &mut N,
    options: &Options<'_>,
) -> Result<HttpConnection<N::Connection, B>, SendError> {
    let url = Url::parse(options.url).map_err(SendError::Connection)?;
    debug!("opening connection to {}:{}", url.host.as_str(), url.port);
    HttpConnection::open(connector, url).map_err(SendError::Connection)
}

/// POST, no caching, input and output both enabled.
pub fn prepare_connection<C: Connection, const B: usize>(
    connection: &mut HttpConnection<C, B>,
    options: &Options<'_>,
) -> Result<(), SendError> {
    configure(connection, options).map_err(SendError::Write)
}

fn configure<C: Connection, const B: usize>(
    connection: &mut HttpConnection<C, B>,
    options: &Options<'_>,
) -> Result<(), Error> {
    connection.set_request_method(Method::Post)?;
    connection.set_use_caches(false)?;
    connection.set_do_input(true)?;
    connection.set_do_output(true)?;
    if let Some(user_agent) = options.user_agent {
        connection.add_request_header("User-Agent", user_agent)?;
    }
    Ok(())
}

/// Serializes `message` onto the request body, then closes the body, which
/// transmits the request.
pub fn write_request_message<C: Connection, M: WebServiceMessage, const B: usize>(
    connection: &mut HttpConnection<C, B>,
    message: &M,
) -> Result<(), SendError> {
    let mut out = connection.output_stream().map_err(SendError::Write)?;
    message.write_to(&mut out).map_err(SendError::Write)?;
    out.flush().map_err(SendError::Write)?;
    out.close().map_err(SendError::Write)
}

/// Rejects every status except `2xx` and [`HTTP_INTERNAL_ERROR`].
pub fn validate_response<C: Connection, const B: usize>(
    connection: &mut HttpConnection<C, B>,
) -> Result<(), SendError> {
    // Custom write phases may leave transmission to this point
    connection.send_request().map_err(SendError::Write)?;
    let code = connection.response_code().map_err(SendError::Read)?;
    debug!("response status {}", code);
    if is_accepted(code) {
        return Ok(());
    }
    let reason = connection.response_message().map_err(SendError::Read)?;
    Err(SendError::unsuccessful(code, reason))
}

/// Hands the response body to the context, unless there is none.
pub fn read_response<C: Connection, X: MessageContext, const B: usize>(
    connection: &mut HttpConnection<C, B>,
    context: &mut X,
) -> Result<(), SendError> {
    let code = connection.response_code().map_err(SendError::Read)?;
    let content_length = connection.content_length().map_err(SendError::Read)?;
    if code == HTTP_NO_CONTENT || content_length == Some(0) {
        return Ok(());
    }
    let mut input = connection.input_stream().map_err(SendError::Read)?;
    context.read_response(&mut input).map_err(SendError::Read)?;
    input.close();
    Ok(())
}
