//! The HTTP-shaped form of a request.

use std::fmt;

/// A request as it travels: method plus path segments, with a body for
/// writes.
///
/// Only the wire mapping ([`ApiRequest::to_wire`](crate::ApiRequest::to_wire))
/// builds these and only the server router takes them apart; the transport
/// in between treats them as opaque. No headers are part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireRequest {
    /// A read: `GET /a/b/c`.
    Get { path: Vec<String> },

    /// A write: `POST /a/b/c` carrying a string body.
    Post { path: Vec<String>, body: String },
}

impl WireRequest {
    /// The HTTP method name, for logging and transports.
    pub fn method(&self) -> &'static str {
        match self {
            WireRequest::Get { .. } => "GET",
            WireRequest::Post { .. } => "POST",
        }
    }

    /// The path segments, in order.
    pub fn path(&self) -> &[String] {
        match self {
            WireRequest::Get { path } => path,
            WireRequest::Post { path, .. } => path,
        }
    }
}

impl fmt::Display for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.path().join("/"))
    }
}
