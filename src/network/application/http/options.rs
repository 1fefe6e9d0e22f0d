use serde::Deserialize;

/// Options for configuring an [`HttpMessageSender`](super::HttpMessageSender).
///
/// Options are fixed for the lifetime of a sender. They can be built in code
/// or borrowed straight out of a JSON document:
///
/// ```rust
/// use libpost::network::application::http::Options;
///
/// let options = Options::from_json(r#"{"url": "http://10.0.0.2:8080/ws", "user_agent": "meter/1.2"}"#)
///     .unwrap();
/// assert_eq!(options.url, "http://10.0.0.2:8080/ws");
/// assert_eq!(options.user_agent, Some("meter/1.2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Options<'a> {
    /// Destination of every request, `http://host[:port][/path]`.
    pub url: &'a str,
    /// Value of the `User-Agent` header; a library default is sent when absent.
    #[serde(borrow, default)]
    pub user_agent: Option<&'a str>,
}

impl<'a> Options<'a> {
    /// Options with only a destination.
    pub fn new(url: &'a str) -> Self {
        Self {
            url,
            user_agent: None,
        }
    }

    /// Deserializes options from a JSON object.
    ///
    /// Strings containing escape sequences cannot be borrowed and are rejected.
    pub fn from_json(json: &'a str) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_str(json).map(|(options, _)| options)
    }
}
