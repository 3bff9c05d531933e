//! Integration tests for routing plus dispatch against an in-memory handler.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;

use slate_protocol::{
    ExerciseGroup, ExerciseIndex, ExerciseMeta, SaveFile, Student, Token,
    WireRequest,
};
use slate_server::{serve, ApiHandler, ServeError};

// =========================================================================
// Mock handler
// =========================================================================

#[derive(Debug, thiserror::Error)]
enum SchoolError {
    #[error("no save stored for {0}")]
    NoSave(Token),
}

/// Keeps everything in memory: saves keyed by token, a fixed index, a
/// fixed student roster.
struct School {
    saves: Mutex<HashMap<Token, SaveFile>>,
}

impl School {
    fn new() -> Self {
        School {
            saves: Mutex::new(HashMap::new()),
        }
    }
}

/// Mints a parseable student token from random bytes.
fn fresh_token() -> Token {
    let mut rng = rand::rng();
    let bytes: [u8; 4] = rng.random();
    let serial = format!(
        "st{:02x}{:02x}-{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    );
    Token::parse(&serial).expect("generated serial is well-formed")
}

impl ApiHandler for School {
    type Error = SchoolError;

    async fn static_content(
        &self,
        path: &[String],
    ) -> Result<String, SchoolError> {
        Ok(format!("static:{}", path.join("/")))
    }

    async fn version(&self) -> Result<String, SchoolError> {
        Ok("0.1.0-test".to_string())
    }

    async fn create_token(
        &self,
        existing: Option<Token>,
    ) -> Result<Token, SchoolError> {
        // Re-issue for a known identity, mint otherwise.
        Ok(existing.unwrap_or_else(fresh_token))
    }

    async fn create_teacher_token(
        &self,
        _requester: Token,
    ) -> Result<Token, SchoolError> {
        let student = fresh_token();
        Ok(Token::parse(&format!("X-{student}"))
            .expect("X- prefix keeps the form valid"))
    }

    async fn fetch_save(&self, token: Token) -> Result<SaveFile, SchoolError> {
        let saves = self.saves.lock().unwrap();
        saves
            .get(&token)
            .cloned()
            .ok_or(SchoolError::NoSave(token))
    }

    async fn update_save(
        &self,
        token: Token,
        save: SaveFile,
    ) -> Result<SaveFile, SchoolError> {
        let mut saves = self.saves.lock().unwrap();
        saves.insert(token, save.clone());
        Ok(save)
    }

    async fn exercise_index(
        &self,
        _token: Token,
    ) -> Result<ExerciseIndex, SchoolError> {
        Ok(ExerciseIndex {
            groups: vec![ExerciseGroup {
                title: "Basics".into(),
                exercises: vec![ExerciseMeta {
                    id: "ex-1".into(),
                    title: "Hello".into(),
                    stars: 1,
                }],
            }],
        })
    }

    async fn students_list(
        &self,
        _token: Token,
    ) -> Result<Vec<Student>, SchoolError> {
        Ok(vec![Student {
            token: Token::parse("abcd-1234").unwrap(),
            nickname: Some("alice".into()),
            results: [("ex-1".to_string(), (80, Some(2)))].into(),
            tags: ["group-a".to_string()].into(),
        }])
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn get(path: &[&str]) -> WireRequest {
    WireRequest::Get {
        path: path.iter().map(|s| s.to_string()).collect(),
    }
}

async fn serve_text(school: &School, request: &WireRequest) -> String {
    let bytes = serve(school, request).await.expect("serve should succeed");
    String::from_utf8(bytes).expect("response should be text")
}

async fn serve_json(
    school: &School,
    request: &WireRequest,
) -> serde_json::Value {
    let bytes = serve(school, request).await.expect("serve should succeed");
    serde_json::from_slice(&bytes).expect("response should be JSON")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_version_response_shape() {
    let school = School::new();
    let json = serve_json(&school, &get(&["version"])).await;
    assert_eq!(json, serde_json::json!({"version": "0.1.0-test"}));
}

#[tokio::test]
async fn test_create_token_mints_a_student_token() {
    let school = School::new();
    let json = serve_json(&school, &get(&["sync", "gimme"])).await;

    let token = Token::parse(json["token"].as_str().unwrap()).unwrap();
    assert!(!token.is_teacher());
}

#[tokio::test]
async fn test_create_token_reissues_existing() {
    let school = School::new();
    let json =
        serve_json(&school, &get(&["sync", "gimme", "abcd-1234"])).await;
    assert_eq!(json, serde_json::json!({"token": "abcd-1234"}));
}

#[tokio::test]
async fn test_teacher_gen_mints_a_teacher_token() {
    let school = School::new();
    let json =
        serve_json(&school, &get(&["teacher", "X-abcd-1234", "gen"])).await;

    let token = Token::parse(json["token"].as_str().unwrap()).unwrap();
    assert!(token.is_teacher());
}

#[tokio::test]
async fn test_teacher_gen_rejects_student_token() {
    let school = School::new();
    let body =
        serve_text(&school, &get(&["teacher", "abcd-1234", "gen"])).await;
    assert_eq!(body, "Unauthorised");
}

#[tokio::test]
async fn test_update_then_fetch_save() {
    let school = School::new();
    let save = SaveFile {
        nickname: Some("alice".into()),
        exercises: Default::default(),
    };

    let post = WireRequest::Post {
        path: vec!["sync".into(), "abcd-1234".into()],
        body: serde_json::to_string(&save).unwrap(),
    };
    let stored = serve_json(&school, &post).await;
    assert_eq!(stored["nickname"], "alice");

    let fetched = serve_json(&school, &get(&["sync", "abcd-1234"])).await;
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn test_fetch_save_unknown_token_is_a_handler_error() {
    let school = School::new();
    let result = serve(&school, &get(&["sync", "abcd-1234"])).await;
    match result {
        Err(ServeError::Handler(SchoolError::NoSave(token))) => {
            assert_eq!(token.to_string(), "abcd-1234");
        }
        other => panic!("expected handler error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_save_bad_body_is_rejected_not_an_error() {
    let school = School::new();
    let post = WireRequest::Post {
        path: vec!["sync".into(), "abcd-1234".into()],
        body: "not json".into(),
    };
    // A malformed body routes to InvalidRequest, whose response is the
    // rejection message; the handler's save methods never run.
    let body = serve_text(&school, &post).await;
    assert!(body.contains("expected"), "unexpected message: {body}");
    assert!(school.saves.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_exercise_index_round_trips() {
    let school = School::new();
    let json =
        serve_json(&school, &get(&["exercise-index", "abcd-1234"])).await;
    assert_eq!(json["groups"][0]["title"], "Basics");
    assert_eq!(json["groups"][0]["exercises"][0]["id"], "ex-1");
}

#[tokio::test]
async fn test_students_list_shape() {
    let school = School::new();
    let json = serve_json(
        &school,
        &get(&["teacher", "X-abcd-1234", "students"]),
    )
    .await;

    assert_eq!(
        json,
        serde_json::json!([{
            "token": "abcd-1234",
            "nickname": "alice",
            "results": [["ex-1", [80, 2]]],
            "tags": ["group-a"]
        }])
    );
}

#[tokio::test]
async fn test_students_list_rejects_student_token() {
    let school = School::new();
    let body =
        serve_text(&school, &get(&["teacher", "abcd-1234", "students"]))
            .await;
    assert_eq!(body, "Unauthorised");
}

#[tokio::test]
async fn test_unmatched_get_serves_static() {
    let school = School::new();
    let body = serve_text(&school, &get(&["foo", "bar"])).await;
    assert_eq!(body, "static:foo/bar");
}

#[tokio::test]
async fn test_root_serves_index() {
    let school = School::new();
    let body = serve_text(&school, &get(&[])).await;
    assert_eq!(body, "static:index.html");
}

#[tokio::test]
async fn test_unmatched_post_echoes_rejection() {
    let school = School::new();
    let post = WireRequest::Post {
        path: vec!["foo".into()],
        body: String::new(),
    };
    let body = serve_text(&school, &post).await;
    assert_eq!(body, "POST foo");
}
