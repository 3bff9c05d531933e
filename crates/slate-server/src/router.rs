//! Classifies incoming wire requests into typed operations.
//!
//! The table below is the inverse of the client's wire mapping: for every
//! operation the client can render, there is a rule here that parses it
//! back. The router is total: unmatched GETs fall through to static
//! content, unmatched POSTs and every malformed or unauthorized token
//! become the `InvalidRequest` operation.

use slate_protocol::{
    CreateTeacherToken, CreateToken, FetchExerciseIndex, FetchSave,
    InvalidRequest, Request, SaveFile, Static, StudentsList, Token,
    UpdateSave, Version, WireRequest,
};

/// Classifies one wire request. Stateless; nothing persists between calls.
pub fn route(request: &WireRequest) -> Request {
    let routed = match request {
        WireRequest::Get { path } => route_get(path),
        WireRequest::Post { path, body } => route_post(path, body),
    };
    tracing::debug!(%request, operation = routed.name(), "routed");
    routed
}

fn route_get(path: &[String]) -> Request {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    match segments.as_slice() {
        [] => Request::Static(Static {
            path: vec!["index.html".into()],
        }),
        ["version"] => Request::Version(Version),
        ["sync", "gimme"] => {
            Request::CreateToken(CreateToken { existing: None })
        }
        ["sync", "gimme", raw] => with_token(raw, |token| {
            Request::CreateToken(CreateToken {
                existing: Some(token),
            })
        }),
        ["teacher", raw, "gen"] => with_teacher(raw, |token| {
            Request::CreateTeacherToken(CreateTeacherToken { token })
        }),
        ["sync", raw] => {
            with_token(raw, |token| Request::FetchSave(FetchSave { token }))
        }
        ["exercise-index", raw] => with_token(raw, |token| {
            Request::ExerciseIndex(FetchExerciseIndex { token })
        }),
        ["teacher", raw, "students"] => with_teacher(raw, |token| {
            Request::StudentsList(StudentsList { token })
        }),
        // Anything else is a static asset lookup, including the paths the
        // legacy ad-hoc JSON requests use.
        _ => Request::Static(Static {
            path: path.to_vec(),
        }),
    }
}

fn route_post(path: &[String], body: &str) -> Request {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    match segments.as_slice() {
        ["sync", raw] => with_token(raw, |token| {
            match serde_json::from_str::<SaveFile>(body) {
                Ok(save) => Request::UpdateSave(UpdateSave { token, save }),
                Err(e) => reject(e.to_string()),
            }
        }),
        _ => reject(format!("POST {}", path.join("/"))),
    }
}

fn reject(message: String) -> Request {
    Request::InvalidRequest(InvalidRequest { message })
}

/// Parses a path token, or answers with its parse error.
fn with_token(raw: &str, build: impl FnOnce(Token) -> Request) -> Request {
    match Token::parse(raw) {
        Ok(token) => build(token),
        Err(e) => reject(e.to_string()),
    }
}

/// Parses a path token and additionally requires the teacher role. A
/// syntactically valid student token is answered with `Unauthorised`;
/// this is the graceful twin of the client-side assertion, because the
/// server sees arbitrary untrusted input here.
fn with_teacher(raw: &str, build: impl FnOnce(Token) -> Request) -> Request {
    match Token::parse(raw) {
        Ok(token) if token.is_teacher() => build(token),
        Ok(_) => reject("Unauthorised".into()),
        Err(e) => reject(e.to_string()),
    }
}

// =========================================================================
// Tests
// =========================================================================
