//! Client side of the Slate protocol.
//!
//! A [`Client`] takes any typed operation, renders it on the wire, hands
//! it to the [`Transport`] you inject, and decodes the raw response with
//! the operation's own codec, so the value you get back has exactly the
//! type the operation declared, or you get a [`ClientError`] saying why
//! not.
//!
//! The crate does no networking itself; the transport is the seam where
//! an HTTP library (or a test loopback) plugs in.

mod client;
mod error;
mod transport;

pub use client::Client;
pub use error::ClientError;
pub use transport::Transport;
