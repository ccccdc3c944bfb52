//! The shortcut API the sidebar item delegates to.
//!
//! [`LocalStoredShortcuts`] keeps the whole list as one JSON document in a
//! [`StorageApi`] bucket and republishes it to subscribers after every
//! mutation.

use crate::error::ShortcutError;
use crate::routes::ColorResolver;
use crate::storage::{Bucket, StorageApi};
use crate::types::{NewShortcut, Shortcut};
use async_trait::async_trait;
use portal_core::Color;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

/// Bucket holding the shortcut list.
pub const BUCKET: &str = "shortcuts";
/// Key of the shortcut list within [`BUCKET`].
pub const ITEMS_KEY: &str = "items";

/// Persistence and presentation services for shortcuts.
#[async_trait]
pub trait ShortcutApi: Send + Sync {
    /// All shortcuts in insertion order.
    async fn list(&self) -> Result<Vec<Shortcut>, ShortcutError>;

    /// One shortcut by id.
    async fn get(&self, id: &str) -> Result<Shortcut, ShortcutError>;

    /// Store a new shortcut and return it with its assigned id.
    async fn add(&self, shortcut: NewShortcut) -> Result<Shortcut, ShortcutError>;

    /// Replace the shortcut with the same id.
    async fn update(&self, shortcut: Shortcut) -> Result<Shortcut, ShortcutError>;

    /// Delete a shortcut by id.
    async fn remove(&self, id: &str) -> Result<(), ShortcutError>;

    /// Avatar color for a URL.
    fn color(&self, url: &str) -> Color;

    /// Receiver that observes the list after every change.
    fn subscribe(&self) -> watch::Receiver<Vec<Shortcut>>;
}

/// [`ShortcutApi`] backed by a [`StorageApi`] bucket.
pub struct LocalStoredShortcuts {
    bucket: Bucket,
    resolver: ColorResolver,
    sender: watch::Sender<Vec<Shortcut>>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for LocalStoredShortcuts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStoredShortcuts")
            .field("bucket", &self.bucket)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl LocalStoredShortcuts {
    /// Create an API over `storage` using the stock color resolver.
    pub fn new(storage: Arc<dyn StorageApi>) -> Self {
        Self::with_resolver(storage, ColorResolver::default())
    }

    /// Create an API with a custom color resolver.
    pub fn with_resolver(storage: Arc<dyn StorageApi>, resolver: ColorResolver) -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            bucket: Bucket::new(storage, BUCKET),
            resolver,
            sender,
            write_lock: Mutex::new(()),
        }
    }

    /// Color resolver in use.
    #[must_use]
    pub const fn resolver(&self) -> &ColorResolver {
        &self.resolver
    }

    async fn load(&self) -> Result<Vec<Shortcut>, ShortcutError> {
        Ok(self.bucket.get_json(ITEMS_KEY).await?.unwrap_or_default())
    }

    async fn store(&self, items: Vec<Shortcut>) -> Result<(), ShortcutError> {
        self.bucket.set_json(ITEMS_KEY, &items).await?;
        self.sender.send_replace(items);
        Ok(())
    }
}

#[async_trait]
impl ShortcutApi for LocalStoredShortcuts {
    async fn list(&self) -> Result<Vec<Shortcut>, ShortcutError> {
        let items = self.load().await?;
        self.sender.send_if_modified(|current| {
            if *current == items {
                false
            } else {
                current.clone_from(&items);
                true
            }
        });
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Shortcut, ShortcutError> {
        self.load()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ShortcutError::NotFound { id: id.to_string() })
    }

    async fn add(&self, shortcut: NewShortcut) -> Result<Shortcut, ShortcutError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let shortcut = shortcut.with_id(uuid::Uuid::new_v4().to_string());
        items.push(shortcut.clone());
        self.store(items).await?;
        info!(id = %shortcut.id, url = %shortcut.url, "added shortcut");
        Ok(shortcut)
    }

    async fn update(&self, shortcut: Shortcut) -> Result<Shortcut, ShortcutError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let slot = items
            .iter_mut()
            .find(|s| s.id == shortcut.id)
            .ok_or_else(|| ShortcutError::NotFound {
                id: shortcut.id.clone(),
            })?;
        slot.clone_from(&shortcut);
        self.store(items).await?;
        info!(id = %shortcut.id, "updated shortcut");
        Ok(shortcut)
    }

    async fn remove(&self, id: &str) -> Result<(), ShortcutError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let before = items.len();
        items.retain(|s| s.id != id);
        if items.len() == before {
            return Err(ShortcutError::NotFound { id: id.to_string() });
        }
        self.store(items).await?;
        info!(id, "removed shortcut");
        Ok(())
    }

    fn color(&self, url: &str) -> Color {
        let category = self.resolver.category(url);
        debug!(url, %category, "resolved shortcut color");
        self.resolver.resolve(url)
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Shortcut>> {
        self.sender.subscribe()
    }
}
