use crate::{
    domain::{
        requests::{RevalidateKind, RevalidateRequest},
        response::RevalidateResponse,
    },
    middleware::validate::format_validation_errors,
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use shared::errors::{HttpError, MessageResponse};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

pub const REVALIDATE_SECRET_HEADER: &str = "x-revalidate-secret";

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::CACHE_CONTROL, "no-store")],
        Json(MessageResponse {
            message: "Unauthorized".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/revalidate",
    tag = "Cache",
    security(("revalidate_secret" = [])),
    request_body = RevalidateRequest,
    responses(
        (status = 200, description = "Cache entries invalidated", body = RevalidateResponse),
        (status = 400, description = "Malformed body", body = shared::errors::ErrorResponse),
        (status = 401, description = "Missing or wrong secret", body = MessageResponse)
    )
)]
pub async fn revalidate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    let provided = headers
        .get(REVALIDATE_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    let authorized = matches!(
        (state.revalidate_secret.as_deref(), provided),
        (Some(expected), Some(provided)) if expected == provided
    );

    if !authorized {
        warn!("Rejected revalidation request with missing or wrong secret");
        return Ok(unauthorized());
    }

    let req = serde_json::from_slice::<RevalidateRequest>(&body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid revalidation body: {e}")))?;
    req.validate()
        .map_err(|errors| HttpError::BadRequest(format_validation_errors(&errors)))?;

    let cache = &state.di_container.page_cache;
    match req.kind {
        RevalidateKind::Path => cache.revalidate_path(&req.value).await?,
        RevalidateKind::Tag => cache.revalidate_tag(&req.value).await?,
    }

    info!("Revalidated {:?} {}", req.kind, req.value);

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(RevalidateResponse::now()),
    )
        .into_response())
}

pub fn revalidate_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/revalidate", post(revalidate_handler))
        .with_state(app_state)
}
