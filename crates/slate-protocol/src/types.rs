//! Payload types that travel through the protocol.
//!
//! These are the structured values operations return: save files, the
//! exercise index, and student records. The protocol layer never interprets
//! them beyond their serde codecs; storage, merging, and grading semantics
//! belong to the server's handler.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use slate_token::Token;

// ---------------------------------------------------------------------------
// Save files
// ---------------------------------------------------------------------------

/// A student's synchronized state: nickname plus per-exercise progress.
///
/// `BTreeMap` keeps the encoded form deterministic; keys are exercise ids
/// and are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Display name chosen by the student, if any.
    pub nickname: Option<String>,

    /// Progress per exercise id.
    #[serde(default)]
    pub exercises: BTreeMap<String, ExerciseState>,
}

/// One exercise's stored state inside a save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseState {
    /// The student's current solution text.
    pub solution: String,

    /// Grade in percent, once the exercise has been graded.
    pub grade: Option<u32>,
}

// ---------------------------------------------------------------------------
// Exercise index
// ---------------------------------------------------------------------------

/// The table of contents of available exercises, grouped for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseIndex {
    pub groups: Vec<ExerciseGroup>,
}

/// A titled group of exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseGroup {
    pub title: String,
    pub exercises: Vec<ExerciseMeta>,
}

/// One exercise's listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMeta {
    pub id: String,
    pub title: String,
    /// Difficulty rating shown in listings.
    #[serde(default)]
    pub stars: u8,
}

// ---------------------------------------------------------------------------
// Student records
// ---------------------------------------------------------------------------

/// One student as reported to teachers.
///
/// The wire shape is fixed:
///
/// ```json
/// {
///   "token": "abcd-1234",
///   "nickname": "alice",
///   "results": [["ex-1", [80, 2]], ["ex-2", [100, null]]],
///   "tags": ["group-a"]
/// }
/// ```
///
/// `results` travels as an array of `[examId, [score, attempts]]` pairs,
/// not as a JSON object; the field attribute below converts between that
/// and the map held here. A `None` attempt count is `null` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// The student's identity token, as a bare string on the wire.
    pub token: Token,

    /// Display name, `null` when the student never picked one.
    pub nickname: Option<String>,

    /// Score and optional attempt count per exercise id. Keys unique, no
    /// ordering promised to consumers.
    #[serde(with = "results_as_pairs")]
    pub results: BTreeMap<String, (u32, Option<u32>)>,

    /// Free-form tags teachers attach to students.
    pub tags: BTreeSet<String>,
}

/// Converts the results map to and from the wire's array-of-pairs form.
mod results_as_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    type Results = BTreeMap<String, (u32, Option<u32>)>;

    pub fn serialize<S>(results: &Results, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<(&String, &(u32, Option<u32>))> =
            results.iter().collect();
        pairs.serialize(ser)
    }

    pub fn deserialize<'de, D>(de: D) -> Result<Results, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs: Vec<(String, (u32, Option<u32>))> = Vec::deserialize(de)?;
        Ok(pairs.into_iter().collect())
    }
}

// =========================================================================
// Tests
// =========================================================================
