//! Route-to-color resolution.
//!
//! A shortcut's color comes from the page category its URL points at. The
//! first path segment is looked up in a [`RouteTable`]; the root path maps to
//! [`PageCategory::Home`] and anything unrecognized maps to the table's
//! default category.

use portal_core::{Color, PageCategory, PageThemes};
use std::collections::BTreeMap;

/// Routes the portal ships with.
const STOCK_ROUTES: &[(&str, PageCategory)] = &[
    ("catalog", PageCategory::Home),
    ("docs", PageCategory::Documentation),
    ("api-docs", PageCategory::Apis),
    ("create", PageCategory::Home),
    ("explore", PageCategory::Home),
    ("settings", PageCategory::Home),
    ("tech-radar", PageCategory::Tool),
];

/// First path segment of a URL, ignoring scheme, host, query and fragment.
///
/// Returns `None` for the root path.
#[must_use]
pub fn route_key(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    // A scheme only counts when it precedes the first '/'.
    let path = match path.split_once("://") {
        Some((scheme, rest)) if !scheme.contains('/') => {
            rest.split_once('/').map_or("", |(_, p)| p)
        }
        _ => path,
    };
    path.split('/').find(|segment| !segment.is_empty())
}

/// Maps first path segments to page categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, PageCategory>,
    default: PageCategory,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::stock()
    }
}

impl RouteTable {
    /// Empty table falling back to `default` for every non-root path.
    #[must_use]
    pub const fn empty(default: PageCategory) -> Self {
        Self {
            routes: BTreeMap::new(),
            default,
        }
    }

    /// The portal's stock routes, defaulting to [`PageCategory::Tool`].
    #[must_use]
    pub fn stock() -> Self {
        STOCK_ROUTES
            .iter()
            .fold(Self::empty(PageCategory::Tool), |table, (key, category)| {
                table.with_route(*key, *category)
            })
    }

    /// Map a first path segment to a category. Keys are case-insensitive.
    #[must_use]
    pub fn with_route(mut self, key: impl AsRef<str>, category: PageCategory) -> Self {
        self.routes
            .insert(key.as_ref().trim_matches('/').to_lowercase(), category);
        self
    }

    /// Change the category used for unrecognized paths.
    #[must_use]
    pub const fn with_default(mut self, default: PageCategory) -> Self {
        self.default = default;
        self
    }

    /// Category used for unrecognized paths.
    #[must_use]
    pub const fn default_category(&self) -> PageCategory {
        self.default
    }

    /// Category of the page a URL points at.
    #[must_use]
    pub fn category(&self, url: &str) -> PageCategory {
        match route_key(url) {
            None => PageCategory::Home,
            Some(key) => self
                .routes
                .get(&key.to_lowercase())
                .copied()
                .unwrap_or(self.default),
        }
    }
}

/// Resolves a URL to its avatar color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorResolver {
    routes: RouteTable,
    themes: PageThemes,
}

impl ColorResolver {
    /// Create a resolver from a route table and theme registry.
    #[must_use]
    pub const fn new(routes: RouteTable, themes: PageThemes) -> Self {
        Self { routes, themes }
    }

    /// Route table in use.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Theme registry in use.
    #[must_use]
    pub const fn themes(&self) -> &PageThemes {
        &self.themes
    }

    /// Category of the page a URL points at.
    #[must_use]
    pub fn category(&self, url: &str) -> PageCategory {
        self.routes.category(url)
    }

    /// Primary palette color for the URL's category. Total over all inputs.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Color {
        self.themes.primary(self.category(url))
    }
}
