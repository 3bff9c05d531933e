//! Error type for client dispatch.

use slate_protocol::ProtocolError;

/// Errors a [`Client::send`](crate::Client::send) can produce.
///
/// The two kinds stay distinct: a transport failure is whatever the
/// injected transport reports, passed through unchanged; a decode failure
/// means the server's bytes did not match the shape the operation
/// declared.
#[derive(Debug, thiserror::Error)]
pub enum ClientError<E: std::error::Error> {
    /// The injected transport failed to deliver the request.
    #[error(transparent)]
    Transport(E),

    /// The response bytes did not decode as the operation's result type.
    #[error("decode failed: {0}")]
    Decode(ProtocolError),
}
