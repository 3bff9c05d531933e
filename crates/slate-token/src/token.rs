//! The token value itself: parsing, formatting, and role classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who a token identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A regular student account.
    Student,
    /// A teacher account, allowed to mint teacher tokens and list students.
    Teacher,
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// An opaque identity token with a student/teacher role tag.
///
/// The canonical form is dash-separated groups of ASCII letters and digits,
/// at least two groups, every group non-empty:
///
/// - `abcd-1234`: a student token
/// - `X-abcd-1234`: a teacher token (first group is exactly `X`)
///
/// `Token::parse` and `Display` round-trip: for any valid token `t`,
/// `Token::parse(&t.to_string())` yields `t` again. The role is a pure
/// function of the canonical form, so two equal strings always carry the
/// same role.
///
/// In JSON a token is its bare canonical string (`"abcd-1234"`), not an
/// object; payloads that embed tokens inherit this via serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Token {
    role: Role,
    serial: String,
}

impl Token {
    /// Parses a token from its canonical string form.
    ///
    /// # Errors
    /// Returns a [`TokenError`] describing the first malformation found.
    /// The error's `Display` text is what the server reports back for a
    /// request carrying this string.
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        if input.is_empty() {
            return Err(TokenError::Empty);
        }

        let groups: Vec<&str> = input.split('-').collect();
        if groups.len() < 2 {
            return Err(TokenError::TooFewGroups);
        }
        for group in &groups {
            if group.is_empty() {
                return Err(TokenError::EmptyGroup);
            }
            if let Some(bad) =
                group.chars().find(|c| !c.is_ascii_alphanumeric())
            {
                return Err(TokenError::InvalidChar(bad));
            }
        }

        // The role marker is the literal first group `X`, uppercase.
        // `x-abcd` is just a student token that happens to start with x.
        let role = if groups[0] == "X" {
            Role::Teacher
        } else {
            Role::Student
        };

        Ok(Token {
            role,
            serial: input.to_string(),
        })
    }

    /// The role this token carries.
    pub fn role(&self) -> Role {
        self.role
    }

    /// `true` for teacher tokens. This is the whole authorization model:
    /// teacher-scoped operations check exactly this predicate.
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// The canonical string form, as it travels in paths and payloads.
    pub fn as_str(&self) -> &str {
        &self.serial
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serial)
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> String {
        token.serial
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Token::parse(&value)
    }
}

// =========================================================================
// Tests
// =========================================================================
