//! Error kinds for the data-access layer.
//!
//! Decode failures abort the whole operation with no partial writes;
//! referential failures reject the request without creating or updating any
//! row; store failures are surfaced as-is and never retried.

use thiserror::Error;

/// Named failure states of the payload scanner and the filter composer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No `name: value` field before the recipe array.
    #[error("payload has no cookie name field")]
    MissingNameField,

    /// The name field never reaches its field separator.
    #[error("cookie name field is not terminated")]
    UnterminatedName,

    /// The captured name span is not a quoted, non-empty string.
    #[error("cookie name is not a quoted string")]
    UnquotedName,

    /// The payload never opens a recipe array.
    #[error("payload has no recipe array")]
    MissingRecipeArray,

    /// The recipe array closes without a single entry.
    #[error("recipe array is empty")]
    EmptyRecipe,

    /// The final entry never reaches the array terminator.
    #[error("recipe entry is not terminated")]
    UnterminatedEntry,

    /// Text after the array terminator other than the payload close.
    #[error("unexpected text after recipe array: {0:?}")]
    TrailingGarbage(String),

    /// An entry chunk is not an ingredient/amount object.
    #[error("malformed recipe entry: {0}")]
    InvalidEntry(String),

    /// Amounts must be positive.
    #[error("ingredient amount must be a positive integer, got {0}")]
    InvalidAmount(i64),

    /// A present filter value that is not a date rejects the whole request.
    #[error("filter '{name}' is not a date: {value:?}")]
    InvalidDate { name: &'static str, value: String },
}

/// Top-level error for every store operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Input text does not match the recognised grammar.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// A delivery or recipe entry names an unregistered ingredient.
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(String),

    /// An operation names a cookie that was never created.
    #[error("unknown cookie: {0}")]
    UnknownProduct(String),

    /// A recipe slice mixes entries for more than one cookie.
    #[error("recipe entries name different cookies: '{0}' and '{1}'")]
    MixedRecipe(String, String),

    /// The ledger row vanished between the update and the re-read.
    #[error("warehouse row for '{0}' missing after update")]
    Inconsistent(String),

    /// The underlying store rejected or could not execute a statement.
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration file problems.
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
