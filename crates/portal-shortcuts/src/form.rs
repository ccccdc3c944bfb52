//! Edit form backing the shortcut edit affordance.

use crate::types::{NewShortcut, Shortcut};
use thiserror::Error;

/// Validation failures of a [`ShortcutForm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// URL is empty after trimming.
    #[error("url must not be empty")]
    EmptyUrl,

    /// URL is not an absolute portal path.
    #[error("url '{url}' must start with '/'")]
    RelativeUrl {
        /// Offending url
        url: String,
    },
}

/// Editable title/url pair seeded from a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortcutForm {
    /// Title field
    pub title: String,
    /// URL field
    pub url: String,
}

impl ShortcutForm {
    /// Form pre-filled with a shortcut's current values.
    #[must_use]
    pub fn from_shortcut(shortcut: &Shortcut) -> Self {
        Self {
            title: shortcut.title.clone(),
            url: shortcut.url.clone(),
        }
    }

    /// Trim and validate the fields.
    pub fn validate(&self) -> Result<NewShortcut, FormError> {
        let title = self.title.trim();
        let url = self.url.trim();

        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if url.is_empty() {
            return Err(FormError::EmptyUrl);
        }
        if !url.starts_with('/') {
            return Err(FormError::RelativeUrl {
                url: url.to_string(),
            });
        }

        Ok(NewShortcut::new(url, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shortcut() {
        let form = ShortcutForm::from_shortcut(&Shortcut::new("id", "/some-url", "some title"));
        assert_eq!(form.title, "some title");
        assert_eq!(form.url, "/some-url");
    }

    #[test]
    fn test_validate_trims() {
        let form = ShortcutForm {
            title: "  Catalog ".to_string(),
            url: " /catalog ".to_string(),
        };
        assert_eq!(form.validate(), Ok(NewShortcut::new("/catalog", "Catalog")));
    }

    #[test]
    fn test_validate_errors() {
        let mut form = ShortcutForm {
            title: "   ".to_string(),
            url: "/x".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::EmptyTitle));

        form.title = "x".to_string();
        form.url = String::new();
        assert_eq!(form.validate(), Err(FormError::EmptyUrl));

        form.url = "catalog".to_string();
        assert_eq!(
            form.validate(),
            Err(FormError::RelativeUrl {
                url: "catalog".to_string()
            })
        );
    }

    #[test]
    fn test_form_error_display() {
        assert_eq!(
            FormError::RelativeUrl {
                url: "x".to_string()
            }
            .to_string(),
            "url 'x' must start with '/'"
        );
    }
}
