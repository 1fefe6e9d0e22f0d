//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols that run over the core network
//! traits. Each protocol works with any type implementing
//! [`Connection`](crate::network::Connection) and keeps its memory use bounded
//! with fixed-size buffers.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 POST transport for request/response messaging

/// HTTP message transport.
///
/// Provides the blocking connection primitive, the scoped body streams and the
/// message sender built on them.
pub mod http;
