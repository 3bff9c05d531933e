//! The request algebra: every remote operation the protocol knows.
//!
//! Each operation is a struct implementing [`ApiRequest`], which fixes its
//! result type, wire form, and response codec in one place. The closed
//! [`Request`] enum mirrors the same set for the server side; none of its
//! `match`es carries a wildcard arm, so adding an operation does not
//! compile until the router and dispatcher handle it too.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use slate_token::Token;

use crate::{
    ExerciseIndex, ResponseCodec, SaveFile, Student, WireRequest,
};

// ---------------------------------------------------------------------------
// The capability every operation implements
// ---------------------------------------------------------------------------

/// One typed remote operation.
///
/// The associated `Response` type is fixed per operation and known without
/// inspecting any runtime value; this is what lets the wire mapping and
/// the codec lookup be total functions of the operation rather than
/// runtime type inspection.
pub trait ApiRequest {
    /// The result type this operation declares.
    type Response;

    /// Renders the operation as its wire request.
    ///
    /// # Panics
    ///
    /// Teacher-scoped operations panic when built with a student token,
    /// and [`InvalidRequest`] panics unconditionally; both are programmer
    /// errors on the rendering side, not runtime conditions. The server
    /// never renders untrusted input through this path; it answers it in
    /// the router instead.
    fn to_wire(&self) -> WireRequest;

    /// The codec for this operation's response payload.
    fn response_codec() -> ResponseCodec<Self::Response>;
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Fetch a static asset by path. Also the server's fallback for any GET
/// that matches no other rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Static {
    pub path: Vec<String>,
}

impl ApiRequest for Static {
    type Response = String;

    fn to_wire(&self) -> WireRequest {
        WireRequest::Get {
            path: self.path.clone(),
        }
    }

    fn response_codec() -> ResponseCodec<String> {
        ResponseCodec::raw_text()
    }
}

/// Ask the server for its version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version;

impl ApiRequest for Version {
    type Response = String;

    fn to_wire(&self) -> WireRequest {
        WireRequest::Get {
            path: vec!["version".into()],
        }
    }

    fn response_codec() -> ResponseCodec<String> {
        ResponseCodec::version_object()
    }
}

/// Obtain a student token. With `existing` set, the server re-issues for
/// that identity instead of minting a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateToken {
    pub existing: Option<Token>,
}

impl ApiRequest for CreateToken {
    type Response = Token;

    fn to_wire(&self) -> WireRequest {
        let mut path = vec!["sync".into(), "gimme".into()];
        if let Some(token) = &self.existing {
            path.push(token.to_string());
        }
        WireRequest::Get { path }
    }

    fn response_codec() -> ResponseCodec<Token> {
        ResponseCodec::token_object()
    }
}

/// Mint a new teacher token. Teacher-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeacherToken {
    pub token: Token,
}

impl ApiRequest for CreateTeacherToken {
    type Response = Token;

    fn to_wire(&self) -> WireRequest {
        assert!(
            self.token.is_teacher(),
            "CreateTeacherToken requires a teacher token"
        );
        WireRequest::Get {
            path: vec!["teacher".into(), self.token.to_string(), "gen".into()],
        }
    }

    fn response_codec() -> ResponseCodec<Token> {
        ResponseCodec::token_object()
    }
}

/// Fetch the save file stored for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSave {
    pub token: Token,
}

impl ApiRequest for FetchSave {
    type Response = SaveFile;

    fn to_wire(&self) -> WireRequest {
        WireRequest::Get {
            path: vec!["sync".into(), self.token.to_string()],
        }
    }

    fn response_codec() -> ResponseCodec<SaveFile> {
        ResponseCodec::json()
    }
}

/// Store a save file for a token. The response is the save as stored,
/// which may be a merge of the upload with existing server state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSave {
    pub token: Token,
    pub save: SaveFile,
}

impl ApiRequest for UpdateSave {
    type Response = SaveFile;

    fn to_wire(&self) -> WireRequest {
        // SaveFile holds only JSON-representable values, so this cannot
        // fail for any constructible save.
        let body = serde_json::to_string(&self.save)
            .expect("save files always have a JSON form");
        WireRequest::Post {
            path: vec!["sync".into(), self.token.to_string()],
            body,
        }
    }

    fn response_codec() -> ResponseCodec<SaveFile> {
        ResponseCodec::json()
    }
}

/// Fetch the exercise index visible to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchExerciseIndex {
    pub token: Token,
}

impl ApiRequest for FetchExerciseIndex {
    type Response = ExerciseIndex;

    fn to_wire(&self) -> WireRequest {
        WireRequest::Get {
            path: vec!["exercise-index".into(), self.token.to_string()],
        }
    }

    fn response_codec() -> ResponseCodec<ExerciseIndex> {
        ResponseCodec::json()
    }
}

/// List all students. Teacher-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentsList {
    pub token: Token,
}

impl ApiRequest for StudentsList {
    type Response = Vec<Student>;

    fn to_wire(&self) -> WireRequest {
        assert!(
            self.token.is_teacher(),
            "StudentsList requires a teacher token"
        );
        WireRequest::Get {
            path: vec![
                "teacher".into(),
                self.token.to_string(),
                "students".into(),
            ],
        }
    }

    fn response_codec() -> ResponseCodec<Vec<Student>> {
        ResponseCodec::json()
    }
}

/// The server's uniform rejection of input it cannot accept: a malformed
/// token, a failed authorization check, an unroutable write. Its result is
/// the rejection message as plain text, flowing through the same dispatch
/// and encode path as every other operation, so callers need no separate
/// protocol-error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequest {
    pub message: String,
}

impl ApiRequest for InvalidRequest {
    type Response = String;

    fn to_wire(&self) -> WireRequest {
        panic!("InvalidRequest has no wire form");
    }

    fn response_codec() -> ResponseCodec<String> {
        ResponseCodec::raw_text()
    }
}

/// Transitional escape hatch: fetch an arbitrary path and decode it as
/// `T`'s own JSON shape. Client-side only; on the server any such path
/// falls into the Static fallback. Prefer adding a typed operation over
/// reaching for this.
pub struct StaticJson<T> {
    pub key: String,
    _response: PhantomData<fn() -> T>,
}

impl<T> StaticJson<T> {
    pub fn new(key: impl Into<String>) -> Self {
        StaticJson {
            key: key.into(),
            _response: PhantomData,
        }
    }
}

impl<T> Clone for StaticJson<T> {
    fn clone(&self) -> Self {
        StaticJson::new(self.key.clone())
    }
}

impl<T> fmt::Debug for StaticJson<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticJson").field("key", &self.key).finish()
    }
}

impl<T: Serialize + DeserializeOwned> ApiRequest for StaticJson<T> {
    type Response = T;

    fn to_wire(&self) -> WireRequest {
        WireRequest::Get {
            path: vec![self.key.clone()],
        }
    }

    fn response_codec() -> ResponseCodec<T> {
        ResponseCodec::json()
    }
}

// ---------------------------------------------------------------------------
// The closed set the server routes
// ---------------------------------------------------------------------------

/// Every operation the server can route, as one value.
///
/// [`StaticJson`] is deliberately absent: it is generic over its response
/// type and exists only as a client-side convenience; the router's GET
/// fallback serves those paths as [`Static`] content.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Static(Static),
    Version(Version),
    CreateToken(CreateToken),
    CreateTeacherToken(CreateTeacherToken),
    FetchSave(FetchSave),
    UpdateSave(UpdateSave),
    ExerciseIndex(FetchExerciseIndex),
    StudentsList(StudentsList),
    InvalidRequest(InvalidRequest),
}

impl Request {
    /// Renders the operation on the wire, delegating to the variant's own
    /// mapping.
    ///
    /// # Panics
    /// On [`InvalidRequest`], and on teacher-scoped variants holding a
    /// student token; see [`ApiRequest::to_wire`].
    pub fn to_wire(&self) -> WireRequest {
        match self {
            Request::Static(r) => r.to_wire(),
            Request::Version(r) => r.to_wire(),
            Request::CreateToken(r) => r.to_wire(),
            Request::CreateTeacherToken(r) => r.to_wire(),
            Request::FetchSave(r) => r.to_wire(),
            Request::UpdateSave(r) => r.to_wire(),
            Request::ExerciseIndex(r) => r.to_wire(),
            Request::StudentsList(r) => r.to_wire(),
            Request::InvalidRequest(r) => r.to_wire(),
        }
    }

    /// A short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Static(_) => "static",
            Request::Version(_) => "version",
            Request::CreateToken(_) => "create-token",
            Request::CreateTeacherToken(_) => "create-teacher-token",
            Request::FetchSave(_) => "fetch-save",
            Request::UpdateSave(_) => "update-save",
            Request::ExerciseIndex(_) => "exercise-index",
            Request::StudentsList(_) => "students-list",
            Request::InvalidRequest(_) => "invalid-request",
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
