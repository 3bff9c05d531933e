//! The handler seam and the dispatch that ties routing to codecs.
//!
//! [`ApiHandler`] is what an embedding server implements: one typed async
//! method per operation. [`dispatch`] awaits the method matching a routed
//! operation and encodes its result with that operation's own codec; the
//! same value that was routed selects the codec, so a response can never
//! be encoded with the wrong shape.

use std::future::Future;

use slate_protocol::{
    ApiRequest, CreateTeacherToken, CreateToken, ExerciseIndex,
    FetchExerciseIndex, FetchSave, InvalidRequest, Request, SaveFile,
    Static, Student, StudentsList, Token, UpdateSave, Version, WireRequest,
};

use crate::{route, ServeError};

/// Executes operations on behalf of the server.
///
/// Implementations own all state and policy: storage, token issuance,
/// merge semantics. The dispatcher has already routed and authorized the
/// operation by the time a method is called; `create_teacher_token` and
/// `students_list` only ever see teacher tokens.
///
/// # Example
///
/// ```rust
/// use slate_server::ApiHandler;
/// use slate_protocol::{ExerciseIndex, SaveFile, Student, Token};
///
/// /// Serves a fixed version and nothing else.
/// struct VersionOnly;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("not supported")]
/// struct Unsupported;
///
/// impl ApiHandler for VersionOnly {
///     type Error = Unsupported;
///
///     async fn version(&self) -> Result<String, Unsupported> {
///         Ok("0.1.0".to_string())
///     }
///
///     async fn static_content(
///         &self,
///         _path: &[String],
///     ) -> Result<String, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn create_token(
///         &self,
///         _existing: Option<Token>,
///     ) -> Result<Token, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn create_teacher_token(
///         &self,
///         _requester: Token,
///     ) -> Result<Token, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn fetch_save(
///         &self,
///         _token: Token,
///     ) -> Result<SaveFile, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn update_save(
///         &self,
///         _token: Token,
///         _save: SaveFile,
///     ) -> Result<SaveFile, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn exercise_index(
///         &self,
///         _token: Token,
///     ) -> Result<ExerciseIndex, Unsupported> {
///         Err(Unsupported)
///     }
///
///     async fn students_list(
///         &self,
///         _token: Token,
///     ) -> Result<Vec<Student>, Unsupported> {
///         Err(Unsupported)
///     }
/// }
/// ```
pub trait ApiHandler: Send + Sync {
    /// The handler's own error type; surfaced unchanged through
    /// [`ServeError::Handler`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Serves a static asset by path.
    fn static_content(
        &self,
        path: &[String],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// The server's version string.
    fn version(
        &self,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Issues a student token, or re-issues for an existing identity.
    fn create_token(
        &self,
        existing: Option<Token>,
    ) -> impl Future<Output = Result<Token, Self::Error>> + Send;

    /// Mints a new teacher token. `requester` is always teacher-role.
    fn create_teacher_token(
        &self,
        requester: Token,
    ) -> impl Future<Output = Result<Token, Self::Error>> + Send;

    /// The save file stored for `token`.
    fn fetch_save(
        &self,
        token: Token,
    ) -> impl Future<Output = Result<SaveFile, Self::Error>> + Send;

    /// Stores `save` for `token` and returns the save as stored (which
    /// may be a merge with existing state).
    fn update_save(
        &self,
        token: Token,
        save: SaveFile,
    ) -> impl Future<Output = Result<SaveFile, Self::Error>> + Send;

    /// The exercise index visible to `token`.
    fn exercise_index(
        &self,
        token: Token,
    ) -> impl Future<Output = Result<ExerciseIndex, Self::Error>> + Send;

    /// All student records. `token` is always teacher-role.
    fn students_list(
        &self,
        token: Token,
    ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send;

    /// Answers a rejected request. The default echoes the rejection
    /// message as the response body.
    fn invalid_request(
        &self,
        message: String,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        async move { Ok(message) }
    }
}

/// Runs a routed operation against the handler and encodes the result
/// with the operation's codec.
pub async fn dispatch<H: ApiHandler>(
    handler: &H,
    operation: Request,
) -> Result<Vec<u8>, ServeError<H::Error>> {
    match operation {
        Request::Static(op) => {
            respond::<Static, _>(handler.static_content(&op.path).await)
        }
        Request::Version(_) => {
            respond::<Version, _>(handler.version().await)
        }
        Request::CreateToken(op) => respond::<CreateToken, _>(
            handler.create_token(op.existing).await,
        ),
        Request::CreateTeacherToken(op) => {
            respond::<CreateTeacherToken, _>(
                handler.create_teacher_token(op.token).await,
            )
        }
        Request::FetchSave(op) => {
            respond::<FetchSave, _>(handler.fetch_save(op.token).await)
        }
        Request::UpdateSave(op) => respond::<UpdateSave, _>(
            handler.update_save(op.token, op.save).await,
        ),
        Request::ExerciseIndex(op) => respond::<FetchExerciseIndex, _>(
            handler.exercise_index(op.token).await,
        ),
        Request::StudentsList(op) => respond::<StudentsList, _>(
            handler.students_list(op.token).await,
        ),
        Request::InvalidRequest(op) => respond::<InvalidRequest, _>(
            handler.invalid_request(op.message).await,
        ),
    }
}

/// Routes and dispatches in one call: the full server side of one
/// request/response cycle, minus the transport.
pub async fn serve<H: ApiHandler>(
    handler: &H,
    request: &WireRequest,
) -> Result<Vec<u8>, ServeError<H::Error>> {
    let operation = route(request);
    dispatch(handler, operation).await
}

/// Encodes one handler result with the operation's own codec.
fn respond<R: ApiRequest, E: std::error::Error>(
    result: Result<R::Response, E>,
) -> Result<Vec<u8>, ServeError<E>> {
    let value = result.map_err(ServeError::Handler)?;
    R::response_codec().encode(&value).map_err(ServeError::Encode)
}
