use async_trait::async_trait;
use std::sync::Arc;

pub type DynUnauthorizedHandler = Arc<dyn UnauthorizedHandlerTrait + Send + Sync>;

/// Reacts to a `401` seen by the HTTP client.
#[async_trait]
pub trait UnauthorizedHandlerTrait {
    async fn on_unauthorized(&self);
}
