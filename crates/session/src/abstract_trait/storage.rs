use anyhow::Result;
use std::sync::Arc;

pub type DynStorage<S> = Arc<dyn StorageAdapter<S> + Send + Sync>;

/// Durable home for one namespaced state blob.
pub trait StorageAdapter<S> {
    /// `None` when nothing was stored or the stored blob is unreadable.
    fn load(&self) -> Option<S>;
    fn save(&self, state: &S) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
