//! The transport seam: how wire requests become bytes somewhere else.

use std::future::Future;

use slate_protocol::WireRequest;

/// Delivers a wire request and returns the raw response bytes.
///
/// Implementations own everything about delivery: connections, timeouts,
/// retries, cancellation. The client awaits one `send` per operation and
/// never retries on its own.
pub trait Transport: Send + Sync {
    /// The transport's own error type, surfaced unchanged through
    /// [`ClientError::Transport`](crate::ClientError::Transport).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Delivers `request` and returns the response body.
    fn send(
        &self,
        request: &WireRequest,
    ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}
