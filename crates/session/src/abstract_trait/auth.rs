use crate::domain::{PermissionSet, UserSummary};
use async_trait::async_trait;
use serde::Serialize;
use shared::errors::ClientError;
use std::sync::Arc;

pub type DynAuthApi = Arc<dyn AuthApiTrait + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait AuthApiTrait {
    async fn login(&self, credentials: &Credentials) -> Result<UserSummary, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn current_user(&self) -> Result<UserSummary, ClientError>;
    async fn fetch_permissions(&self) -> Result<PermissionSet, ClientError>;
}
