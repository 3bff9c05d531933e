//! Response codecs: one encode/decode pair per operation.
//!
//! A [`ResponseCodec`] is how one operation's result becomes bytes and
//! comes back. Codecs are obtained through
//! [`ApiRequest::response_codec`](crate::ApiRequest::response_codec), never
//! looked up by name, so a codec cannot be wired to the wrong operation.
//!
//! Where an operation's wire shape differs from its logical type (a token
//! is a structured value logically but `{"token": "<string>"}` on the wire),
//! the codec composes the raw JSON serializer with a lossless conversion in
//! each direction.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slate_token::Token;

use crate::ProtocolError;

/// Paired encode/decode functions for one operation's result type.
///
/// For every legal value `v`, `decode(encode(v))` yields `v` again. A
/// decode of bytes that do not match the expected shape fails with
/// [`ProtocolError::Decode`], never a silent default.
pub struct ResponseCodec<T> {
    encode: fn(&T) -> Result<Vec<u8>, ProtocolError>,
    decode: fn(&[u8]) -> Result<T, ProtocolError>,
}

impl<T> ResponseCodec<T> {
    /// Serializes a response value into bytes.
    pub fn encode(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        (self.encode)(value)
    }

    /// Deserializes bytes back into a response value.
    pub fn decode(&self, data: &[u8]) -> Result<T, ProtocolError> {
        (self.decode)(data)
    }
}

impl<T: Serialize + DeserializeOwned> ResponseCodec<T> {
    /// The plain JSON codec: the value's own serde shape, unchanged.
    /// Save files, the exercise index, and student lists use this.
    pub fn json() -> Self {
        ResponseCodec {
            encode: |value| {
                serde_json::to_vec(value).map_err(ProtocolError::Encode)
            },
            decode: |data| {
                serde_json::from_slice(data).map_err(ProtocolError::Decode)
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire wrappers: the structural difference between logical and wire form
// ---------------------------------------------------------------------------

/// Wire shape of the version response: `{"version": "<string>"}`.
#[derive(Serialize, Deserialize)]
struct VersionWire {
    version: String,
}

/// Wire shape of token issuance responses: `{"token": "<string>"}`.
/// `Token` itself serializes as its bare canonical string.
#[derive(Serialize, Deserialize)]
struct TokenWire {
    token: Token,
}

impl ResponseCodec<String> {
    /// Raw text, UTF-8 bytes. Static content and rejection messages.
    pub fn raw_text() -> Self {
        ResponseCodec {
            encode: |value| Ok(value.clone().into_bytes()),
            decode: |data| {
                String::from_utf8(data.to_vec())
                    .map_err(ProtocolError::NotUtf8)
            },
        }
    }

    /// The version string wrapped as `{"version": "<string>"}`.
    pub fn version_object() -> Self {
        ResponseCodec {
            encode: |value| {
                serde_json::to_vec(&VersionWire {
                    version: value.clone(),
                })
                .map_err(ProtocolError::Encode)
            },
            decode: |data| {
                serde_json::from_slice::<VersionWire>(data)
                    .map(|wire| wire.version)
                    .map_err(ProtocolError::Decode)
            },
        }
    }
}

impl ResponseCodec<Token> {
    /// A token wrapped as `{"token": "<string>"}`. Decoding re-parses the
    /// string, so a malformed token in a response is a decode failure.
    pub fn token_object() -> Self {
        ResponseCodec {
            encode: |value| {
                serde_json::to_vec(&TokenWire {
                    token: value.clone(),
                })
                .map_err(ProtocolError::Encode)
            },
            decode: |data| {
                serde_json::from_slice::<TokenWire>(data)
                    .map(|wire| wire.token)
                    .map_err(ProtocolError::Decode)
            },
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SaveFile;

    #[test]
    fn test_raw_text_round_trip() {
        let codec = ResponseCodec::raw_text();
        let bytes = codec.encode(&"hello".to_string()).unwrap();
        assert_eq!(bytes, b"hello");
        assert_eq!(codec.decode(&bytes).unwrap(), "hello");
    }

    #[test]
    fn test_raw_text_rejects_invalid_utf8() {
        let codec = ResponseCodec::raw_text();
        let result = codec.decode(&[0xff, 0xfe]);
        assert!(matches!(result, Err(ProtocolError::NotUtf8(_))));
    }

    #[test]
    fn test_version_object_shape() {
        let codec = ResponseCodec::version_object();
        let bytes = codec.encode(&"0.1.0".to_string()).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"version": "0.1.0"}));
    }

    #[test]
    fn test_version_object_round_trip() {
        let codec = ResponseCodec::version_object();
        let bytes = codec.encode(&"2.3.1".to_string()).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), "2.3.1");
    }

    #[test]
    fn test_token_object_shape() {
        let codec = ResponseCodec::token_object();
        let token = Token::parse("X-abcd-1234").unwrap();
        let bytes = codec.encode(&token).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"token": "X-abcd-1234"}));
    }

    #[test]
    fn test_token_object_round_trip_preserves_role() {
        let codec = ResponseCodec::token_object();
        for raw in ["abcd-1234", "X-abcd-1234"] {
            let token = Token::parse(raw).unwrap();
            let bytes = codec.encode(&token).unwrap();
            let decoded = codec.decode(&bytes).unwrap();
            assert_eq!(decoded, token);
            assert_eq!(decoded.role(), token.role());
        }
    }

    #[test]
    fn test_token_object_rejects_malformed_token() {
        let codec = ResponseCodec::token_object();
        let result = codec.decode(br#"{"token": "notatoken"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_round_trip() {
        let codec = ResponseCodec::<SaveFile>::json();
        let save = SaveFile {
            nickname: Some("bob".into()),
            exercises: Default::default(),
        };
        let bytes = codec.encode(&save).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), save);
    }

    #[test]
    fn test_json_codec_decode_garbage_fails() {
        let codec = ResponseCodec::<SaveFile>::json();
        let result = codec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_wrong_shape_fails() {
        // Valid JSON, wrong shape: exercises must be an object.
        let codec = ResponseCodec::<SaveFile>::json();
        let result = codec.decode(br#"{"nickname": 7, "exercises": []}"#);
        assert!(result.is_err());
    }
}
