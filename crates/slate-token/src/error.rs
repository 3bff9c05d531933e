//! Error type for token parsing.

/// Ways a token string can be malformed.
///
/// The `Display` form of each variant doubles as the rejection message the
/// server sends back for that input, so the wording is part of the
/// observable behavior.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The input was the empty string.
    #[error("empty token")]
    Empty,

    /// A token needs at least two dash-separated groups; a bare word like
    /// `abcd` is not a token.
    #[error("token needs at least two dash-separated groups")]
    TooFewGroups,

    /// Two adjacent dashes (or a leading/trailing dash) produce an empty
    /// group, e.g. `abcd--1234`.
    #[error("token contains an empty group")]
    EmptyGroup,

    /// A group contained something other than ASCII letters and digits.
    #[error("invalid character {0:?} in token")]
    InvalidChar(char),
}
