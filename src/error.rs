//! Error types for criteria construction.

use thiserror::Error;

/// Result type for criteria operations.
pub type CriteriaResult<T> = Result<T, CriteriaError>;

/// Errors that can occur while building criteria from raw values.
///
/// Construction is the only fallible step in this crate: operator and
/// direction tags arrive as strings from transport or configuration and
/// must belong to a closed set. Everything built from already-typed
/// values is infallible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// Operator tag outside the supported set.
    ///
    /// The canonical equality tag is `==`. A bare `=` is rejected, as is
    /// any casing variant of the word operators (`like`, `In`, ...).
    #[error("invalid filter operator `{0}`")]
    InvalidOperator(String),

    /// Direction tag other than `ASC` or `DESC`.
    #[error("invalid order direction `{0}`")]
    InvalidDirection(String),
}
