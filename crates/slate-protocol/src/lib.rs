//! The protocol contract shared by Slate clients and servers.
//!
//! This crate is the single place a remote operation is defined. Each
//! operation is a small request struct implementing [`ApiRequest`], which
//! binds together:
//!
//! - its argument shape (the struct's fields),
//! - its result type ([`ApiRequest::Response`]),
//! - its wire form ([`ApiRequest::to_wire`] → [`WireRequest`]),
//! - and the codec for its result ([`ApiRequest::response_codec`]).
//!
//! The server consumes the same definitions through the closed [`Request`]
//! enum, so the client's rendering and the server's routing cannot drift
//! apart: a new operation is a new struct, a new enum variant, and a
//! compile error everywhere the variant is not yet handled.
//!
//! # Architecture
//!
//! ```text
//! Client: ApiRequest ──to_wire──→ WireRequest ──(external transport)──→
//! Server: WireRequest ──route──→ Request ──handler──→ Response
//!         Response ──response_codec──→ bytes ──(transport)──→ Client
//! ```
//!
//! The crate itself does no I/O and holds no state; everything here is a
//! pure value-to-value mapping.

mod codec;
mod error;
mod requests;
mod types;
mod wire;

pub use codec::ResponseCodec;
pub use error::ProtocolError;
pub use requests::{
    ApiRequest, CreateTeacherToken, CreateToken, FetchExerciseIndex,
    FetchSave, InvalidRequest, Request, Static, StaticJson, StudentsList,
    UpdateSave, Version,
};
pub use types::{
    ExerciseGroup, ExerciseIndex, ExerciseMeta, ExerciseState, SaveFile,
    Student,
};
pub use wire::WireRequest;

// The identity types travel with every protocol import.
pub use slate_token::{Role, Token, TokenError};
