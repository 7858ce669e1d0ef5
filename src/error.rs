//! Crate-level error type.

use thiserror::Error;

use crate::sdk::executor::ExecError;
use crate::sql::{IdentifierError, RenderError, UnknownVariant};
use crate::validation::ValidationErrors;

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Options failed validation; nothing was rendered.
    #[error("validation failed:\n{0}")]
    Validation(#[from] ValidationErrors),

    /// Options could not be rendered (misuse, not bad input).
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The executor failed.
    #[error(transparent)]
    Execution(#[from] ExecError),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// A result row did not have the expected shape.
    #[error("failed to decode row: {0}")]
    RowDecode(#[from] serde_json::Error),

    /// A column held a value the decoder cannot interpret.
    #[error("invalid value {value:?} in column {column}")]
    InvalidColumnValue { column: String, value: String },

    /// The requested object does not exist.
    #[error("object does not exist or not authorized: {0}")]
    ObjectNotFound(String),

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
}

impl Error {
    /// True for [`Error::ObjectNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ObjectNotFound(_))
    }
}
