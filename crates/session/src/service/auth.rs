use crate::{
    abstract_trait::{AuthApiTrait, Credentials},
    client::ApiClient,
    domain::{PermissionSet, UserSummary},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use shared::errors::ClientError;
use tracing::info;

/// Some endpoints answer `{ "data": ... }`, others the bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthApiService {
    client: ApiClient,
}

impl AuthApiService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApiTrait for AuthApiService {
    async fn login(&self, credentials: &Credentials) -> Result<UserSummary, ClientError> {
        info!("Submitting login");
        let response: Envelope<UserSummary> = self.client.post("/auth/login", credentials).await?;
        Ok(response.into_inner())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let _: Value = self.client.post("/auth/logout", &Value::Null).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<UserSummary, ClientError> {
        let response: Envelope<UserSummary> = self.client.get("/auth/me").await?;
        Ok(response.into_inner())
    }

    async fn fetch_permissions(&self) -> Result<PermissionSet, ClientError> {
        let response: Envelope<PermissionSet> = self.client.get("/permissions/me").await?;
        Ok(response.into_inner())
    }
}
