//! Destination parsing for the HTTP transport.

use crate::network::error::Error;
use core::fmt::Write;
use heapless::String;

/// Maximum length of a host name.
pub const MAX_HOST_LEN: usize = 128;
/// Maximum length of a request target (path plus query).
pub const MAX_PATH_LEN: usize = 256;
/// Maximum length of a `host:port` authority string.
pub const MAX_AUTHORITY_LEN: usize = MAX_HOST_LEN + 6;

const DEFAULT_HTTP_PORT: u16 = 80;

/// URL schemes the parser recognizes.
///
/// Only [`Scheme::Http`] can be opened by this transport; `https` is parsed so
/// that it can be rejected with a precise error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain-text HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    fn parse(s: &str) -> Result<Self, Error> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Scheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Scheme::Https)
        } else {
            Err(Error::UnsupportedScheme)
        }
    }

    fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => DEFAULT_HTTP_PORT,
            Scheme::Https => 443,
        }
    }
}

/// A parsed absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// The scheme.
    pub scheme: Scheme,
    /// Host name or address literal, without brackets.
    pub host: String<MAX_HOST_LEN>,
    /// Explicit port, or the scheme's default.
    pub port: u16,
    /// Request target; always starts with `/`.
    pub path: String<MAX_PATH_LEN>,
}

impl Url {
    /// Parses `scheme://host[:port][/path][?query]`.
    ///
    /// Fragments are dropped. Userinfo is rejected since the transport carries
    /// no authentication.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let (scheme, rest) = input.split_once("://").ok_or(Error::InvalidAddress)?;
        let scheme = Scheme::parse(scheme)?;

        let rest = match rest.find('#') {
            Some(pos) => &rest[..pos],
            None => rest,
        };
        let split = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, target) = rest.split_at(split);

        if authority.is_empty() || authority.contains('@') {
            return Err(Error::InvalidAddress);
        }

        let (host, port) = split_host_port(authority)?;
        let port = match port {
            Some(p) => p.parse::<u16>().map_err(|_| Error::InvalidAddress)?,
            None => scheme.default_port(),
        };

        let mut path: String<MAX_PATH_LEN> = String::new();
        if !target.starts_with('/') {
            path.push('/').map_err(|_| Error::BufferOverflow)?;
        }
        path.push_str(target).map_err(|_| Error::BufferOverflow)?;

        Ok(Url {
            scheme,
            host: String::try_from(host).map_err(|_| Error::BufferOverflow)?,
            port,
            path,
        })
    }

    /// The `host:port` string handed to [`Connect::connect`](crate::network::Connect::connect).
    pub fn authority(&self) -> Result<String<MAX_AUTHORITY_LEN>, Error> {
        let mut out = String::new();
        if self.host.contains(':') {
            write!(out, "[{}]:{}", self.host, self.port)
        } else {
            write!(out, "{}:{}", self.host, self.port)
        }
        .map_err(|_| Error::BufferOverflow)?;
        Ok(out)
    }

    /// Value for the `Host` request header; the port is omitted when it is the default.
    pub fn host_header(&self) -> Result<String<MAX_AUTHORITY_LEN>, Error> {
        if self.port == self.scheme.default_port() {
            let mut out = String::new();
            if self.host.contains(':') {
                write!(out, "[{}]", self.host).map_err(|_| Error::BufferOverflow)?;
            } else {
                out.push_str(&self.host).map_err(|_| Error::BufferOverflow)?;
            }
            Ok(out)
        } else {
            self.authority()
        }
    }
}

fn split_host_port(authority: &str) -> Result<(&str, Option<&str>), Error> {
    if let Some(rest) = authority.strip_prefix('[') {
        // IPv6 literal
        let (host, after) = rest.split_once(']').ok_or(Error::InvalidAddress)?;
        if host.is_empty() {
            return Err(Error::InvalidAddress);
        }
        return match after {
            "" => Ok((host, None)),
            _ => after
                .strip_prefix(':')
                .map(|port| (host, Some(port)))
                .ok_or(Error::InvalidAddress),
        };
    }
    match authority.split_once(':') {
        Some(("", _)) => Err(Error::InvalidAddress),
        Some((host, port)) => Ok((host, Some(port))),
        None => Ok((authority, None)),
    }
}
