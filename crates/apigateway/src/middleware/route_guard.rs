use crate::config::RouteGuardConfig;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::debug;

/// Sends visitors of protected pages without a session cookie to the login
/// page, remembering where they were headed in `?redirect=`.
pub async fn route_guard_middleware(
    State(config): State<Arc<RouteGuardConfig>>,
    cookie_jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    let has_session = cookie_jar
        .get(&config.session_cookie)
        .is_some_and(|cookie| !cookie.value().is_empty());

    if has_session || !config.is_protected(path) {
        return next.run(req).await;
    }

    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path);

    debug!("No session cookie for protected path {path}, redirecting to login");

    Redirect::to(&login_location(&config.login_path, target)).into_response()
}

pub fn login_location(login_path: &str, target: &str) -> String {
    format!("{login_path}?redirect={}", urlencoding::encode(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_target_is_encoded() {
        assert_eq!(
            login_location("/login", "/dashboard/courses?tab=drafts"),
            "/login?redirect=%2Fdashboard%2Fcourses%3Ftab%3Ddrafts"
        );
    }
}
