//! Errors returned by grid configuration and operations.

use crate::rows::RowId;
use thiserror::Error;

/// Rejected configuration or operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Two columns were configured with the same key.
    #[error("duplicate column key `{0}`")]
    DuplicateColumn(String),
    /// A key that names no configured column.
    #[error("unknown column key `{0}`")]
    UnknownColumn(String),
    /// The column has a custom renderer or a non-text type.
    #[error("column `{0}` is not editable")]
    NotEditable(String),
    /// No row at the given position of the current page.
    #[error("no row at position {0}")]
    RowNotFound(usize),
    /// The row was deleted or replaced.
    #[error("{0} is no longer in the grid")]
    UnknownRow(RowId),
    /// A page size outside the allowed choices.
    #[error("page size {0} is not one of the allowed sizes")]
    PageSizeNotAllowed(usize),
    /// Another edit is in progress and the switch policy blocks new ones.
    #[error("an edit is already in progress on column `{0}`")]
    EditInProgress(String),
}
