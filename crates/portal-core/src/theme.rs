//! Page themes: per-category color palettes used to tint portal pages and
//! the sidebar entries that link to them.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Logical page category. Each category owns a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCategory {
    /// Landing and catalog pages
    Home,
    /// Documentation pages
    Documentation,
    /// Internal tools and plugins
    Tool,
    /// Service entity pages
    Service,
    /// Website entity pages
    Website,
    /// Library entity pages
    Library,
    /// Anything uncategorized
    Other,
    /// Application entity pages
    App,
    /// API entity pages
    Apis,
}

impl PageCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::Documentation,
        Self::Tool,
        Self::Service,
        Self::Website,
        Self::Library,
        Self::Other,
        Self::App,
        Self::Apis,
    ];

    /// Lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Documentation => "documentation",
            Self::Tool => "tool",
            Self::Service => "service",
            Self::Website => "website",
            Self::Library => "library",
            Self::Other => "other",
            Self::App => "app",
            Self::Apis => "apis",
        }
    }

    /// Stock palette for this category.
    #[must_use]
    pub fn stock_theme(self) -> PageTheme {
        let rgb: &[(u8, u8, u8)] = match self {
            Self::Home | Self::Apis => &[(0x00, 0x5B, 0x4B)],
            Self::Documentation => &[(0xC8, 0x07, 0x7A), (0xC2, 0x29, 0x7D)],
            Self::Tool => &[(0x89, 0x12, 0xCA), (0x3E, 0x00, 0xEA)],
            Self::Service => &[(0x00, 0x6D, 0x8F), (0x00, 0x49, 0xA1)],
            Self::Website => &[(0x00, 0x27, 0xAF), (0x27, 0x00, 0x94)],
            Self::Library => &[(0x98, 0x00, 0x2B), (0x8D, 0x11, 0x34)],
            Self::Other => &[(0x17, 0x17, 0x17), (0x38, 0x38, 0x38)],
            Self::App => &[(0xBE, 0x22, 0x00), (0xA4, 0x1D, 0x00)],
        };
        PageTheme {
            colors: rgb.iter().map(|&(r, g, b)| Color::rgb8(r, g, b)).collect(),
        }
    }
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page category: '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Palette for one page category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTheme {
    /// Ordered colors; the first is the category's primary color.
    pub colors: Vec<Color>,
}

impl PageTheme {
    /// Create a theme from colors.
    #[must_use]
    pub const fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// First palette color, if any.
    #[must_use]
    pub fn primary(&self) -> Option<Color> {
        self.colors.first().copied()
    }
}

/// Registry of page themes keyed by category.
///
/// Lookups are total: a category that is missing or has an empty palette
/// falls back to its stock theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageThemes {
    themes: BTreeMap<PageCategory, PageTheme>,
}

impl Default for PageThemes {
    fn default() -> Self {
        Self::stock()
    }
}

impl PageThemes {
    /// Registry holding the stock theme for every category.
    #[must_use]
    pub fn stock() -> Self {
        Self {
            themes: PageCategory::ALL
                .into_iter()
                .map(|c| (c, c.stock_theme()))
                .collect(),
        }
    }

    /// Replace the theme of one category.
    #[must_use]
    pub fn with_theme(mut self, category: PageCategory, theme: PageTheme) -> Self {
        self.themes.insert(category, theme);
        self
    }

    /// Overlay another registry on top of this one.
    pub fn merge(&mut self, overrides: Self) {
        self.themes.extend(overrides.themes);
    }

    /// Theme registered for a category, if any.
    #[must_use]
    pub fn get(&self, category: PageCategory) -> Option<&PageTheme> {
        self.themes.get(&category)
    }

    /// Categories whose registered palette is empty.
    #[must_use]
    pub fn empty_palettes(&self) -> Vec<PageCategory> {
        self.themes
            .iter()
            .filter(|(_, theme)| theme.colors.is_empty())
            .map(|(c, _)| *c)
            .collect()
    }

    /// Primary color of a category.
    #[must_use]
    pub fn primary(&self, category: PageCategory) -> Color {
        self.get(category)
            .and_then(PageTheme::primary)
            .or_else(|| category.stock_theme().primary())
            .unwrap_or(Color::BLACK)
    }
}
