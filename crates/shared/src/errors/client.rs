use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to the messages the backend reported for it.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Session expired")]
    Unauthorized,

    #[error("Validation failed: {0:?}")]
    Validation(ValidationErrors),

    #[error("Request failed with status {status}")]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classifies a non-success response from the remote API.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if status == 401 {
            return ClientError::Unauthorized;
        }

        let parsed = serde_json::from_slice::<Value>(body).ok();

        if let Some(fields) = parsed.as_ref().and_then(validation_errors) {
            return ClientError::Validation(fields);
        }

        ClientError::Api {
            status,
            message: parsed.as_ref().and_then(error_message),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// User-facing notices: one per field per message for validation failures,
    /// otherwise a single notice.
    pub fn notices(&self) -> Vec<String> {
        match self {
            ClientError::Validation(fields) => fields
                .iter()
                .flat_map(|(field, messages)| {
                    messages.iter().map(move |msg| format!("{field}: {msg}"))
                })
                .collect(),
            ClientError::Api {
                message: Some(message),
                ..
            } => vec![message.clone()],
            _ => vec![FALLBACK_MESSAGE.to_string()],
        }
    }
}

/// Pulls a human readable message out of a backend error body.
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .filter(|msg| !msg.is_empty())
        .map(str::to_owned)
}

fn validation_errors(body: &Value) -> Option<ValidationErrors> {
    let object = body.get("errors")?.as_object()?;

    let mut fields = ValidationErrors::new();
    for (field, value) in object {
        let messages: Vec<String> = match value {
            Value::String(msg) => vec![msg.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => continue,
        };

        if !messages.is_empty() {
            fields.insert(field.clone(), messages);
        }
    }

    (!fields.is_empty()).then_some(fields)
}
