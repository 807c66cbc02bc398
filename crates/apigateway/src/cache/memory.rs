use super::{page_key, tag_key};
use crate::abstract_trait::PageCacheTrait;
use async_trait::async_trait;
use shared::errors::HttpError;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Entries {
    pages: HashMap<String, String>,
    tags: HashMap<String, HashSet<String>>,
}

/// Process-local page cache used when no Redis is configured. Keys follow the
/// same `page:` / `tag:` layout as the Redis cache.
#[derive(Default)]
pub struct MemoryPageCache {
    entries: RwLock<Entries>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.pages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PageCacheTrait for MemoryPageCache {
    async fn store_page(&self, path: &str, tags: &[String], body: &str) -> Result<(), HttpError> {
        let mut entries = self.entries.write().await;
        entries.pages.insert(page_key(path), body.to_string());
        for tag in tags {
            entries
                .tags
                .entry(tag_key(tag))
                .or_default()
                .insert(path.to_string());
        }
        Ok(())
    }

    async fn cached_page(&self, path: &str) -> Result<Option<String>, HttpError> {
        Ok(self.entries.read().await.pages.get(&page_key(path)).cloned())
    }

    async fn revalidate_path(&self, path: &str) -> Result<(), HttpError> {
        self.entries.write().await.pages.remove(&page_key(path));
        debug!("Revalidated path: {}", path);
        Ok(())
    }

    async fn revalidate_tag(&self, tag: &str) -> Result<(), HttpError> {
        let mut entries = self.entries.write().await;
        let paths = entries.tags.remove(&tag_key(tag)).unwrap_or_default();
        for path in &paths {
            entries.pages.remove(&page_key(path));
        }
        debug!("Revalidated tag {} ({} pages)", tag, paths.len());
        Ok(())
    }
}
