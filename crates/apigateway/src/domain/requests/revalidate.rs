use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RevalidateKind {
    Path,
    Tag,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct RevalidateRequest {
    #[serde(rename = "type")]
    pub kind: RevalidateKind,

    #[validate(length(min = 1, message = "value is required"))]
    pub value: String,
}
