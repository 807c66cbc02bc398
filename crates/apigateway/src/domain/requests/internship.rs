use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Forwarded to the backend as-is; range checks are the backend's call.
#[derive(Debug, Clone, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindAllInternship {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Default for FindAllInternship {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
        }
    }
}

impl FindAllInternship {
    /// Query pairs in the shape the backend's `/internships` endpoint expects.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("search".to_string(), self.search.clone()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateInternshipStatusRequest {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_params_fall_back_to_defaults() {
        let params: FindAllInternship = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 10);
        assert_eq!(params.search, "");
    }

    #[test]
    fn query_uses_backend_parameter_names() {
        let params = FindAllInternship {
            page: 3,
            page_size: 25,
            search: "rust".into(),
        };

        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "3".to_string()),
                ("pageSize".to_string(), "25".to_string()),
                ("search".to_string(), "rust".to_string()),
            ]
        );
    }

    #[test]
    fn blank_status_is_rejected() {
        let req = UpdateInternshipStatusRequest {
            status: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
