use crate::domain::response::{ProxyRequest, ProxyResponse};
use async_trait::async_trait;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynBackendClient = Arc<dyn BackendClientTrait + Send + Sync>;

#[async_trait]
pub trait BackendClientTrait {
    /// Sends `request` to the backend API. Any backend status, error statuses
    /// included, comes back as `Ok`; `Err` means the backend was never reached.
    async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, HttpError>;
}
