use async_trait::async_trait;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynPageCache = Arc<dyn PageCacheTrait + Send + Sync>;

/// Shared cache of rendered pages, keyed by path and grouped by tag.
///
/// The gateway itself only invalidates. `store_page` and `cached_page` are the
/// write and read side for the page renderers that share the same Redis.
#[async_trait]
pub trait PageCacheTrait {
    async fn store_page(&self, path: &str, tags: &[String], body: &str) -> Result<(), HttpError>;

    async fn cached_page(&self, path: &str) -> Result<Option<String>, HttpError>;

    async fn revalidate_path(&self, path: &str) -> Result<(), HttpError>;

    /// Drops every page stored under `tag`, then the tag itself.
    async fn revalidate_tag(&self, tag: &str) -> Result<(), HttpError>;
}
