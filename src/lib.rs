//! # libpost - web service messages over HTTP POST
//!
//! A small Rust transport that sends one request message over a blocking
//! HTTP/1.1 POST exchange and delivers the reply to a message context. It is
//! designed for embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! - **Message Sender**: one fresh connection per call, released on every path
//! - **Typed failures**: connection, write, unsuccessful status and read errors
//!   are distinct variants
//! - **Fault delivery**: `500` responses are handed to the context so fault
//!   bodies are not lost
//! - **Pluggable transport**: any blocking byte stream implementing the
//!   [`network`] traits can carry the exchange
//! - **Phase hooks**: override single steps of the exchange without
//!   reimplementing the sequence
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libpost = "0.1.0"
//! ```
//!
//! ### Sending a JSON request
//!
//! ```rust,no_run
//! use libpost::message::{BufferedContext, JsonMessage};
//! use libpost::network::application::http::{HttpMessageSender, Options};
//! # use libpost::network::{Close, Connect, Connection, Read, Write};
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockNetwork;
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     type Error = libpost::network::error::Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, Self::Error> { Ok(MockConnection) }
//! # }
//!
//! #[derive(serde::Serialize)]
//! struct Reading {
//!     sensor: &'static str,
//!     celsius: f32,
//! }
//!
//! let options = Options::new("http://api.example.com/readings");
//! let mut sender = HttpMessageSender::new(MockNetwork, options);
//!
//! let reading = Reading { sensor: "t1", celsius: 21.5 };
//! let message: JsonMessage<'_, _> = JsonMessage::new(&reading);
//! let mut context: BufferedContext<'_, _> = BufferedContext::new(&message);
//!
//! sender.send_and_receive(&mut context)?;
//! # Ok::<(), libpost::network::application::http::SendError>(())
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support, including a TCP connector
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer providing connection traits and the HTTP transport.
///
/// This module contains the blocking connection traits every transport is
/// built on, and the HTTP message sender itself.
pub mod network;

/// Outgoing messages and the contexts that receive their responses.
pub mod message;

/// Scoped request and response streams handed to messages and contexts.
pub mod transport;
