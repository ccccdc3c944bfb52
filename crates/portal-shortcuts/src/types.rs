//! Shortcut records.

use serde::{Deserialize, Serialize};

/// A user-saved named link shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut {
    /// Stable identity, unique within a store
    pub id: String,
    /// Route path the shortcut navigates to
    pub url: String,
    /// Free-form display name
    pub title: String,
}

impl Shortcut {
    /// Create a shortcut.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Payload for creating a shortcut; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShortcut {
    /// Route path
    pub url: String,
    /// Display name
    pub title: String,
}

impl NewShortcut {
    /// Create a payload.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Attach an id.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Shortcut {
        Shortcut {
            id: id.into(),
            url: self.url,
            title: self.title,
        }
    }
}
