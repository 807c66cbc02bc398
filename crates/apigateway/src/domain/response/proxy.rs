use axum::{
    body::Bytes,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use serde_json::Value;
use shared::errors::{HttpError, error_message};

pub const UPSTREAM_FALLBACK: &str = "Request to backend failed";
pub const INVALID_BACKEND_RESPONSE: &str = "Invalid response from backend";

/// A backend call on behalf of a browser request. `path` is relative to the
/// backend API base URL.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub cookie: Option<String>,
    pub body: Option<Value>,
}

impl ProxyRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            cookie: None,
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl ProxyResponse {
    /// Fails with a 500 when a successful backend response is not JSON.
    pub fn ensure_json(self) -> Result<Self, HttpError> {
        if self.status.is_success() && serde_json::from_slice::<IgnoredAny>(&self.body).is_err() {
            return Err(HttpError::Internal(INVALID_BACKEND_RESPONSE.to_string()));
        }
        Ok(self)
    }

    /// Success responses pass through byte-for-byte with the backend status.
    /// Failures keep the status and carry the backend's message in `{"error"}`.
    pub fn into_relay(self) -> Result<Response, HttpError> {
        if !self.status.is_success() {
            let message = serde_json::from_slice::<Value>(&self.body)
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| UPSTREAM_FALLBACK.to_string());

            return Err(HttpError::Upstream {
                status: self.status,
                message,
            });
        }

        let content_type = self
            .content_type
            .unwrap_or_else(|| "application/json".to_string());

        Ok((
            self.status,
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "no-store".to_string()),
            ],
            self.body,
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> ProxyResponse {
        ProxyResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.map(str::to_owned),
            body: Bytes::from(body.to_string()),
        }
    }

    #[tokio::test]
    async fn missing_content_type_defaults_to_json() {
        let relayed = response(200, None, r#"{"total":3}"#).into_relay().unwrap();

        assert_eq!(relayed.status(), StatusCode::OK);
        assert_eq!(relayed.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(relayed.headers()[header::CACHE_CONTROL], "no-store");

        let body = to_bytes(relayed.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"total":3}"#);
    }

    #[test]
    fn backend_content_type_is_kept() {
        let relayed = response(201, Some("text/plain"), "queued")
            .into_relay()
            .unwrap();

        assert_eq!(relayed.status(), StatusCode::CREATED);
        assert_eq!(relayed.headers()[header::CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn failure_keeps_status_and_backend_message() {
        let err = response(403, None, r#"{"message":"forbidden"}"#)
            .into_relay()
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "403 Forbidden forbidden");
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let err = response(500, Some("text/html"), "<h1>oops</h1>")
            .into_relay()
            .unwrap_err();

        assert!(matches!(
            err,
            HttpError::Upstream { message, .. } if message == UPSTREAM_FALLBACK
        ));
    }

    #[test]
    fn unparsable_success_body_is_an_internal_error() {
        let err = response(200, None, "not json").ensure_json().unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert!(response(404, None, "not json").ensure_json().is_ok());
    }
}
