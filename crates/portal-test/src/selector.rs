//! CSS-like selector parsing for widget queries.
//!
//! Supports:
//! - `"Avatar"` - by widget type name
//! - `"[data-testid='edit']"` - by test ID
//! - `"[aria-label='Edit shortcut']"` - by accessible name
//! - `"text=ST"` / `"text='some title'"` - by exact visible text

use portal_core::Widget;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by widget type name
    Type(String),
    /// Match by test ID (e.g., `[data-testid='foo']`)
    TestId(String),
    /// Match by attribute (e.g., `[aria-label='foo']`)
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// Match by exact visible text
    Text(String),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::Type(name) => widget.type_name() == name,
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Attribute { name, value } => match name.as_str() {
                "aria-label" => widget.accessible_name() == Some(value.as_str()),
                "role" => format!("{:?}", widget.accessible_role()).eq_ignore_ascii_case(value),
                _ => false,
            },
            Self::Text(text) => widget.text_content() == Some(text.as_str()),
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();

        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        if self.input[self.pos..].starts_with("text=") {
            self.pos += "text=".len();
            return Ok(Selector::Text(self.read_value()));
        }

        match first {
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => self.parse_type(),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until('=');
        if name.is_empty() || self.peek_char().is_none() {
            return Err(SelectorError::InvalidAttribute);
        }

        self.advance(); // '='

        let quote = self.peek_char();
        if quote == Some('\'') || quote == Some('"') {
            self.advance();
        }

        let value = self.read_until_any(&['\'', '"', ']']);

        if self.peek_char() == Some('\'') || self.peek_char() == Some('"') {
            self.advance();
        }

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        if name == "data-testid" {
            Ok(Selector::TestId(value))
        } else {
            Ok(Selector::Attribute { name, value })
        }
    }

    /// Rest of the input, with one layer of matching quotes removed.
    fn read_value(&mut self) -> String {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        for quote in ['\'', '"'] {
            if rest.len() >= 2 && rest.starts_with(quote) && rest.ends_with(quote) {
                return rest[1..rest.len() - 1].to_string();
            }
        }
        rest.to_string()
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until(&mut self, stop: char) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == stop {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type() {
        let sel = Selector::parse("Avatar").unwrap();
        assert_eq!(sel, Selector::Type("Avatar".to_string()));
    }

    #[test]
    fn test_parse_test_id() {
        let sel = Selector::parse("[data-testid='edit']").unwrap();
        assert_eq!(sel, Selector::TestId("edit".to_string()));
    }

    #[test]
    fn test_parse_test_id_double_quotes() {
        let sel = Selector::parse("[data-testid=\"edit\"]").unwrap();
        assert_eq!(sel, Selector::TestId("edit".to_string()));
    }

    #[test]
    fn test_parse_attribute() {
        let sel = Selector::parse("[aria-label='Edit shortcut']").unwrap();
        assert_eq!(
            sel,
            Selector::Attribute {
                name: "aria-label".to_string(),
                value: "Edit shortcut".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            Selector::parse("text=ST").unwrap(),
            Selector::Text("ST".to_string())
        );
        assert_eq!(
            Selector::parse("text='some title'").unwrap(),
            Selector::Text("some title".to_string())
        );
        assert_eq!(
            Selector::parse("text=\"more | title words\"").unwrap(),
            Selector::Text("more | title words".to_string())
        );
    }

    #[test]
    fn test_parse_text_keeps_inner_spaces() {
        assert_eq!(
            Selector::parse("text=two title").unwrap(),
            Selector::Text("two title".to_string())
        );
    }

    #[test]
    fn test_parse_whitespace() {
        let sel = Selector::parse("  Avatar  ").unwrap();
        assert_eq!(sel, Selector::Type("Avatar".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("@x"), Err(SelectorError::UnexpectedChar('@')));
        assert_eq!(
            Selector::parse("[data-testid]"),
            Err(SelectorError::InvalidAttribute)
        );
        assert_eq!(
            Selector::parse("[data-testid='edit'"),
            Err(SelectorError::UnclosedAttribute)
        );
    }

    #[test]
    fn test_selector_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        assert_eq!(
            SelectorError::UnexpectedChar('@').to_string(),
            "unexpected character: '@'"
        );
        assert_eq!(
            SelectorError::UnclosedAttribute.to_string(),
            "unclosed attribute bracket"
        );
    }
}
