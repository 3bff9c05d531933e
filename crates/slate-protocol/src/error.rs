//! Error type for the protocol layer.

/// Errors that can occur while encoding or decoding a response payload.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed. For the payload types in this crate this
    /// indicates a programming error, not bad input; every value they can
    /// hold has a JSON representation.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, missing fields, wrong data
    /// types, or a token string that does not parse.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A raw-text response was not valid UTF-8.
    #[error("decode failed: response is not UTF-8: {0}")]
    NotUtf8(std::string::FromUtf8Error),
}
