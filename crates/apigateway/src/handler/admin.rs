use super::forwarded_cookie;
use crate::{abstract_trait::DynBackendClient, domain::response::ProxyRequest, state::AppState};
use axum::{
    extract::Extension,
    http::{HeaderMap, Method},
    response::Response,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Dashboard statistics relayed from the backend"),
        (status = 401, description = "Session missing or expired", body = shared::errors::ErrorResponse),
        (status = 502, description = "Backend unreachable", body = shared::errors::ErrorResponse)
    )
)]
pub async fn get_admin_stats(
    Extension(backend): Extension<DynBackendClient>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let request =
        ProxyRequest::new(Method::GET, "/admin/stats").with_cookie(forwarded_cookie(&headers));

    backend.forward(request).await?.into_relay()
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/stats", get(get_admin_stats))
        .layer(Extension(app_state.di_container.backend_client.clone()))
}
