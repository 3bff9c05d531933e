//! Quickstart: a complete client/server round trip, no network required.
//!
//! Implements an in-memory [`ApiHandler`], wires `slate_server::serve`
//! directly into a client transport, and walks through the student and
//! teacher flows. Run with `RUST_LOG=debug` to watch every request get
//! routed.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

use rand::Rng;
use slate_client::{Client, Transport};
use slate_protocol::{
    CreateTeacherToken, CreateToken, ExerciseGroup, ExerciseIndex,
    ExerciseMeta, ExerciseState, FetchExerciseIndex, FetchSave, SaveFile,
    Student, StudentsList, Token, UpdateSave, Version, WireRequest,
};
use slate_server::{serve, ApiHandler, ServeError};

// ---------------------------------------------------------------------------
// An in-memory school
// ---------------------------------------------------------------------------

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

/// Mints a parseable token from random bytes, teacher-prefixed on demand.
fn mint(teacher: bool) -> Token {
    let mut rng = rand::rng();
    let bytes: [u8; 6] = rng.random();
    let serial = format!(
        "{}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}",
        if teacher { "X-" } else { "" },
        bytes[0],
        bytes[1],
        bytes[2],
        bytes[3],
        bytes[4],
        bytes[5],
    );
    Token::parse(&serial).expect("minted serial is well-formed")
}

impl ApiHandler for School {
    type Error = Infallible;

    async fn static_content(
        &self,
        path: &[String],
    ) -> Result<String, Infallible> {
        Ok(format!("<!-- {} -->", path.join("/")))
    }

    async fn version(&self) -> Result<String, Infallible> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn create_token(
        &self,
        existing: Option<Token>,
    ) -> Result<Token, Infallible> {
        Ok(existing.unwrap_or_else(|| mint(false)))
    }

    async fn create_teacher_token(
        &self,
        requester: Token,
    ) -> Result<Token, Infallible> {
        tracing::info!(%requester, "minting teacher token");
        Ok(mint(true))
    }

    async fn fetch_save(&self, token: Token) -> Result<SaveFile, Infallible> {
        // An identity with nothing stored yet gets an empty save.
        let saves = self.saves.lock().unwrap();
        Ok(saves.get(&token).cloned().unwrap_or_default())
    }

    async fn update_save(
        &self,
        token: Token,
        mut save: SaveFile,
    ) -> Result<SaveFile, Infallible> {
        let mut saves = self.saves.lock().unwrap();

        // Merge with what we already have: a stored grade is never lowered
        // by a stale upload.
        if let Some(stored) = saves.get(&token) {
            for (id, state) in &stored.exercises {
                let keep = match save.exercises.get(id) {
                    Some(incoming) => incoming.grade < state.grade,
                    None => true,
                };
                if keep {
                    save.exercises.insert(id.clone(), state.clone());
                }
            }
        }

        saves.insert(token, save.clone());
        Ok(save)
    }

    async fn exercise_index(
        &self,
        _token: Token,
    ) -> Result<ExerciseIndex, Infallible> {
        Ok(ExerciseIndex {
            groups: vec![ExerciseGroup {
                title: "Basics".into(),
                exercises: vec![
                    ExerciseMeta {
                        id: "hello".into(),
                        title: "Hello, world".into(),
                        stars: 1,
                    },
                    ExerciseMeta {
                        id: "fizzbuzz".into(),
                        title: "FizzBuzz".into(),
                        stars: 2,
                    },
                ],
            }],
        })
    }

    async fn students_list(
        &self,
        _token: Token,
    ) -> Result<Vec<Student>, Infallible> {
        let saves = self.saves.lock().unwrap();
        let mut students: Vec<Student> = saves
            .iter()
            .map(|(token, save)| Student {
                token: token.clone(),
                nickname: save.nickname.clone(),
                results: save
                    .exercises
                    .iter()
                    .map(|(id, state)| {
                        (id.clone(), (state.grade.unwrap_or(0), None))
                    })
                    .collect(),
                tags: Default::default(),
            })
            .collect();
        students.sort_by(|a, b| a.token.as_str().cmp(b.token.as_str()));
        Ok(students)
    }
}

// ---------------------------------------------------------------------------
// Loopback transport: the "network" is a function call
// ---------------------------------------------------------------------------

struct Loopback {
    school: School,
}

impl Transport for Loopback {
    type Error = ServeError<Infallible>;

    async fn send(
        &self,
        request: &WireRequest,
    ) -> Result<Vec<u8>, Self::Error> {
        serve(&self.school, request).await
    }
}

// ---------------------------------------------------------------------------
// The walkthrough
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = Client::new(Loopback {
        school: School::new(),
    });

    let version = client.send(&Version).await?;
    println!("server version: {version}");

    // Student flow: get an identity, work, sync.
    let token = client.send(&CreateToken { existing: None }).await?;
    println!("student token: {token}");

    let index = client
        .send(&FetchExerciseIndex {
            token: token.clone(),
        })
        .await?;
    println!(
        "exercises: {}",
        index.groups[0]
            .exercises
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let save = SaveFile {
        nickname: Some("alice".into()),
        exercises: [(
            "hello".to_string(),
            ExerciseState {
                solution: "fn main() { println!(\"hello\"); }".into(),
                grade: Some(100),
            },
        )]
        .into(),
    };
    client
        .send(&UpdateSave {
            token: token.clone(),
            save,
        })
        .await?;

    let fetched = client
        .send(&FetchSave {
            token: token.clone(),
        })
        .await?;
    println!(
        "synced save for {}: {} exercise(s)",
        fetched.nickname.as_deref().unwrap_or("?"),
        fetched.exercises.len()
    );

    // Teacher flow: mint a colleague's token, read the roster.
    let teacher = Token::parse("X-abcd-1234")?;
    let minted = client
        .send(&CreateTeacherToken {
            token: teacher.clone(),
        })
        .await?;
    println!("minted teacher token: {minted}");

    let students = client.send(&StudentsList { token: teacher }).await?;
    for student in &students {
        println!(
            "student {}: nickname={:?}, {} result(s)",
            student.token,
            student.nickname,
            student.results.len()
        );
    }

    Ok(())
}
