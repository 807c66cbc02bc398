use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    /// Milliseconds since the Unix epoch.
    pub now: i64,
}

impl RevalidateResponse {
    pub fn now() -> Self {
        Self {
            revalidated: true,
            now: chrono::Utc::now().timestamp_millis(),
        }
    }
}
