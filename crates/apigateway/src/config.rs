use anyhow::{Context, Result};

pub const DEFAULT_OTEL_ENDPOINT: &str = "http://otel-collector:4317";

/// Which page paths need a session cookie and where to send visitors without one.
#[derive(Debug, Clone)]
pub struct RouteGuardConfig {
    pub session_cookie: String,
    pub login_path: String,
    pub protected_prefixes: Vec<String>,
}

impl Default for RouteGuardConfig {
    fn default() -> Self {
        Self {
            session_cookie: "token".to_string(),
            login_path: "/login".to_string(),
            protected_prefixes: parse_prefixes("/dashboard,/admin"),
        }
    }
}

impl RouteGuardConfig {
    /// Segment-aware prefix match: `/admin` covers `/admin` and `/admin/x`, not `/administrator`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_api_url: String,
    pub revalidate_secret: Option<String>,
    pub redis_url: Option<String>,
    pub otel_endpoint: String,
    pub route_guard: RouteGuardConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let backend_api_url = std::env::var("BACKEND_API_URL")
            .context("Missing environment variable: BACKEND_API_URL")?
            .trim_end_matches('/')
            .to_string();

        let revalidate_secret = optional_var("REVALIDATE_SECRET");
        let redis_url = optional_var("REDIS_URL");
        let otel_endpoint =
            optional_var("OTEL_ENDPOINT").unwrap_or_else(|| DEFAULT_OTEL_ENDPOINT.to_string());

        let defaults = RouteGuardConfig::default();
        let route_guard = RouteGuardConfig {
            session_cookie: optional_var("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            login_path: optional_var("LOGIN_PATH").unwrap_or(defaults.login_path),
            protected_prefixes: optional_var("PROTECTED_PREFIXES")
                .map(|raw| parse_prefixes(&raw))
                .unwrap_or(defaults.protected_prefixes),
        };

        Ok(Self {
            port,
            backend_api_url,
            revalidate_secret,
            redis_url,
            otel_endpoint,
            route_guard,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Splits a comma separated prefix list, normalising each entry to `/segment`
/// without a trailing slash. Blank entries and a bare `/` are dropped.
pub fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().trim_matches('/'))
        .filter(|entry| !entry.is_empty())
        .map(|entry| format!("/{entry}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_normalised() {
        assert_eq!(
            parse_prefixes(" dashboard/, /admin ,,/"),
            vec!["/dashboard".to_string(), "/admin".to_string()]
        );
    }

    #[test]
    fn protection_respects_segment_boundaries() {
        let guard = RouteGuardConfig::default();

        assert!(guard.is_protected("/dashboard"));
        assert!(guard.is_protected("/dashboard/courses/42"));
        assert!(guard.is_protected("/admin/"));
        assert!(!guard.is_protected("/administrator"));
        assert!(!guard.is_protected("/login"));
        assert!(!guard.is_protected("/"));
    }
}
