//! Error type for serving requests.

use slate_protocol::ProtocolError;

/// Errors that can occur while dispatching a routed operation.
///
/// Routing itself never fails; unacceptable input becomes the
/// `InvalidRequest` operation and flows through dispatch normally.
#[derive(Debug, thiserror::Error)]
pub enum ServeError<E: std::error::Error> {
    /// The injected handler failed; carries the handler's own error.
    #[error("handler failed: {0}")]
    Handler(E),

    /// The handler's return value could not be encoded. The codec is
    /// total over the operation's declared result type, so this means the
    /// handler broke its contract; embedders should treat it as fatal.
    #[error("encode failed: {0}")]
    Encode(ProtocolError),
}
