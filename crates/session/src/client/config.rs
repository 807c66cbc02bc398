pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Where the client code is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeContext {
    /// Inside a page served from `origin`; requests go same-origin.
    Browser { origin: String },
    /// Startup or build-time evaluation with no page origin.
    Server,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_origin: Option<String>,
    pub context: RuntimeContext,
}

impl ClientConfig {
    pub fn new(api_origin: Option<String>, context: RuntimeContext) -> Self {
        Self {
            api_origin,
            context,
        }
    }

    /// Reads the explicit origin from `API_ORIGIN`, if set.
    pub fn from_env(context: RuntimeContext) -> Self {
        Self::new(std::env::var("API_ORIGIN").ok(), context)
    }

    pub fn base_url(&self) -> String {
        resolve_base_url(self.api_origin.as_deref(), &self.context)
    }
}

/// Explicit origin first, then same-origin in a browser, then the local default.
pub fn resolve_base_url(configured: Option<&str>, context: &RuntimeContext) -> String {
    let origin = match configured.map(str::trim).filter(|o| !o.is_empty()) {
        Some(origin) => origin,
        None => match context {
            RuntimeContext::Browser { origin } => origin.as_str(),
            RuntimeContext::Server => DEFAULT_ORIGIN,
        },
    };

    format!("{}{API_PREFIX}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_origin_wins() {
        let browser = RuntimeContext::Browser {
            origin: "https://academy.example".into(),
        };
        assert_eq!(
            resolve_base_url(Some("https://api.example/"), &browser),
            "https://api.example/api/v1"
        );
    }

    #[test]
    fn browser_falls_back_to_same_origin() {
        let browser = RuntimeContext::Browser {
            origin: "https://academy.example".into(),
        };
        assert_eq!(
            resolve_base_url(None, &browser),
            "https://academy.example/api/v1"
        );
        assert_eq!(
            resolve_base_url(Some("  "), &browser),
            "https://academy.example/api/v1"
        );
    }

    #[test]
    fn server_falls_back_to_local_default() {
        assert_eq!(
            resolve_base_url(None, &RuntimeContext::Server),
            "http://localhost:8000/api/v1"
        );
    }
}
