//! TOML configuration for the shortcuts sidebar.
//!
//! ```toml
//! [sidebar]
//! is_open = true
//!
//! [routes]
//! default = "tool"
//! [routes.map]
//! catalog = "home"
//!
//! [themes.tool]
//! colors = ["#8912CA", "#3E00EA"]
//! ```
//!
//! Every section is optional. Route entries extend the stock routes and
//! theme entries replace the stock palette of their category.

use crate::routes::{ColorResolver, RouteTable};
use portal_core::{PageCategory, PageThemes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A theme was configured with no colors.
    #[error("theme '{category}' has an empty palette")]
    EmptyPalette {
        /// Offending category
        category: PageCategory,
    },
}

/// Rendering-host options for the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
    /// Whether the sidebar is expanded and shows titles
    pub is_open: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self { is_open: true }
    }
}

impl SidebarOptions {
    /// Expanded sidebar.
    #[must_use]
    pub const fn open() -> Self {
        Self { is_open: true }
    }

    /// Collapsed sidebar.
    #[must_use]
    pub const fn collapsed() -> Self {
        Self { is_open: false }
    }
}

/// Route section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Category for unrecognized paths
    pub default: PageCategory,
    /// First path segment to category
    pub map: BTreeMap<String, PageCategory>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            default: PageCategory::Tool,
            map: BTreeMap::new(),
        }
    }
}

impl RoutesConfig {
    /// Stock route table extended with the configured entries.
    #[must_use]
    pub fn route_table(&self) -> RouteTable {
        self.map
            .iter()
            .fold(RouteTable::stock(), |table, (key, category)| {
                table.with_route(key, *category)
            })
            .with_default(self.default)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutsConfig {
    /// Sidebar options
    pub sidebar: SidebarOptions,
    /// Route-to-category mapping
    pub routes: RoutesConfig,
    /// Palette overrides
    pub themes: PageThemes,
}

impl ShortcutsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "loaded shortcuts config");
        Ok(config)
    }

    /// Reject palettes without colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.themes.empty_palettes().first() {
            Some(&category) => Err(ConfigError::EmptyPalette { category }),
            None => Ok(()),
        }
    }

    /// Color resolver for this configuration.
    #[must_use]
    pub fn color_resolver(&self) -> ColorResolver {
        let mut themes = PageThemes::stock();
        themes.merge(self.themes.clone());
        ColorResolver::new(self.routes.route_table(), themes)
    }
}
