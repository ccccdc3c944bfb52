//! Sidebar shortcuts.
//!
//! A shortcut is a user-saved named link. Each one is shown in the sidebar
//! as a [`ShortcutItem`]: an avatar tinted by the category of the page it
//! points at, labelled with an abbreviation of its title.
//!
//! - [`abbreviate`] derives the avatar label from a title
//! - [`ColorResolver`] maps a URL to its page category's primary color
//! - [`ShortcutApi`] persists shortcuts; [`LocalStoredShortcuts`] does so
//!   over any [`StorageApi`]
//! - [`ShortcutsConfig`] loads sidebar, route and theme settings from TOML

pub mod abbreviation;
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod item;
pub mod routes;
pub mod storage;
pub mod types;

pub use abbreviation::{abbreviate, FALLBACK_LABEL};
pub use api::{LocalStoredShortcuts, ShortcutApi};
pub use config::{ConfigError, RoutesConfig, ShortcutsConfig, SidebarOptions};
pub use error::ShortcutError;
pub use form::{FormError, ShortcutForm};
pub use item::{HoverState, ShortcutEditRequested, ShortcutItem, ShortcutNavigate, EDIT_TEST_ID};
pub use routes::{route_key, ColorResolver, RouteTable};
pub use storage::{Bucket, MemoryStorage, StorageApi, StorageError};
pub use types::{NewShortcut, Shortcut};
