use thiserror::Error;

/// Errors produced while parsing a filter expression.
///
/// Evaluation never fails: an absent field or a type mismatch makes a
/// clause false, not an error. Every failure here is a parse failure,
/// distinct from a query that simply matches nothing.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// The expression was empty or all whitespace.
    #[error("empty query expression")]
    Empty,

    /// A character that starts no valid token.
    #[error("unexpected character {character:?} at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// A numeric literal that does not parse.
    #[error("malformed number {literal:?} at position {position}")]
    MalformedNumber { literal: String, position: usize },

    /// A comparison without a field name where one was expected.
    #[error("expected a field name, found {found}")]
    ExpectedField { found: String },

    /// A comparison without an operator after the field name.
    #[error("expected a comparison operator after field {field:?}, found {found}")]
    ExpectedOperator { field: String, found: String },

    /// A comparison without a literal value after the operator.
    #[error("missing value after operator in comparison on field {field:?}")]
    MissingValue { field: String },

    /// Tokens left over after a complete comparison; only `and` may join
    /// clauses.
    #[error("expected \"and\" between comparisons, found {found}")]
    ExpectedAnd { found: String },

    /// The expression ended right after an `and`.
    #[error("dangling \"and\" at end of expression")]
    DanglingAnd,
}

/// Result alias for query parsing.
pub type QueryResult<T> = Result<T, QueryError>;
