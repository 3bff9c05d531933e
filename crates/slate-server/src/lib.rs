//! Server side of the Slate protocol: routing and dispatch.
//!
//! [`route`] classifies an incoming [`WireRequest`](slate_protocol::WireRequest)
//! into a typed [`Request`](slate_protocol::Request); every method/path
//! combination maps to *some* operation, with malformed or unauthorized
//! input answered by the `InvalidRequest` operation rather than an error
//! channel. [`dispatch`] hands the routed operation to an [`ApiHandler`]
//! you implement and encodes the typed result with the operation's own
//! codec. [`serve`] is the two chained together.
//!
//! This crate performs no I/O: an embedding HTTP server feeds it wire
//! requests and writes back the bytes it returns.

mod error;
mod handler;
mod router;

pub use error::ServeError;
pub use handler::{dispatch, serve, ApiHandler};
pub use router::route;
