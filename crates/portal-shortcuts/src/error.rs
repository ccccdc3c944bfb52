//! Error types for shortcut operations.

use crate::form::FormError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by [`ShortcutApi`](crate::api::ShortcutApi) operations.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No shortcut with this id exists.
    #[error("shortcut '{id}' not found")]
    NotFound {
        /// Requested id
        id: String,
    },

    /// The edit form did not validate.
    #[error("invalid shortcut: {0}")]
    InvalidForm(#[from] FormError),
}
