//! The typed dispatcher.

use slate_protocol::ApiRequest;

use crate::{ClientError, Transport};

/// Sends typed operations over an injected transport.
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Client { transport }
    }

    /// Sends one operation and decodes its response.
    ///
    /// The response type is the one the operation declares: sending
    /// [`FetchSave`](slate_protocol::FetchSave) yields a
    /// [`SaveFile`](slate_protocol::SaveFile), sending
    /// [`Version`](slate_protocol::Version) yields a `String`, with no
    /// downcasting anywhere.
    ///
    /// # Errors
    /// [`ClientError::Transport`] passes the transport's failure through
    /// unchanged; [`ClientError::Decode`] means the response bytes did
    /// not match the declared shape.
    ///
    /// # Panics
    /// Rendering panics for the operations that have no legal wire form;
    /// see [`ApiRequest::to_wire`].
    pub async fn send<R: ApiRequest>(
        &self,
        request: &R,
    ) -> Result<R::Response, ClientError<T::Error>> {
        let wire = request.to_wire();
        tracing::debug!(%wire, "sending request");

        let bytes = self
            .transport
            .send(&wire)
            .await
            .map_err(ClientError::Transport)?;

        R::response_codec()
            .decode(&bytes)
            .map_err(ClientError::Decode)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use slate_protocol::{
        CreateToken, FetchSave, SaveFile, Token, Version, WireRequest,
    };

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("transport down")]
    struct Down;

    /// Replies with fixed bytes and records the wire request it saw.
    struct Canned {
        reply: Vec<u8>,
        seen: Mutex<Option<WireRequest>>,
    }

    impl Canned {
        fn replying(reply: &[u8]) -> Self {
            Canned {
                reply: reply.to_vec(),
                seen: Mutex::new(None),
            }
        }
    }

    impl Transport for Canned {
        type Error = Down;

        async fn send(
            &self,
            request: &WireRequest,
        ) -> Result<Vec<u8>, Down> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(self.reply.clone())
        }
    }

    /// Always fails.
    struct Dead;

    impl Transport for Dead {
        type Error = Down;

        async fn send(&self, _: &WireRequest) -> Result<Vec<u8>, Down> {
            Err(Down)
        }
    }

    #[tokio::test]
    async fn test_send_decodes_declared_type() {
        let client = Client::new(Canned::replying(br#"{"version":"1.2.3"}"#));
        let version = client.send(&Version).await.unwrap();
        assert_eq!(version, "1.2.3");
    }

    #[tokio::test]
    async fn test_send_renders_the_operation_wire_form() {
        let transport = Canned::replying(br#"{"token":"abcd-1234"}"#);
        let client = Client::new(transport);

        let _ = client
            .send(&CreateToken { existing: None })
            .await
            .unwrap();

        let seen = client.transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.to_string(), "GET /sync/gimme");
    }

    #[tokio::test]
    async fn test_send_decodes_token_response() {
        let client =
            Client::new(Canned::replying(br#"{"token":"X-abcd-1234"}"#));
        let token = client
            .send(&CreateToken { existing: None })
            .await
            .unwrap();
        assert!(token.is_teacher());
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let client = Client::new(Dead);
        let result = client.send(&Version).await;
        assert!(matches!(result, Err(ClientError::Transport(Down))));
    }

    #[tokio::test]
    async fn test_mismatched_response_is_a_decode_error() {
        // A save-file request answered with something else entirely.
        let client = Client::new(Canned::replying(b"<html>oops</html>"));
        let result = client
            .send(&FetchSave {
                token: Token::parse("abcd-1234").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_save_round_trips_through_canned_bytes() {
        let save = SaveFile {
            nickname: Some("alice".into()),
            exercises: Default::default(),
        };
        let client =
            Client::new(Canned::replying(&serde_json::to_vec(&save).unwrap()));
        let fetched = client
            .send(&FetchSave {
                token: Token::parse("abcd-1234").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(fetched, save);
    }
}
