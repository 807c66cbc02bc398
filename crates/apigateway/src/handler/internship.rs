use super::forwarded_cookie;
use crate::{
    abstract_trait::DynBackendClient,
    domain::{
        requests::{FindAllInternship, UpdateInternshipStatusRequest},
        response::ProxyRequest,
    },
    middleware::validate::{SimpleQuery, SimpleValidatedJson},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, Method},
    response::Response,
    routing::get,
};
use serde_json::{Value, json};
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::debug;
use utoipa_axum::router::OpenApiRouter;

/// Application ids are interpolated into backend paths, so only plain
/// identifier characters are accepted.
fn application_id(id: &str) -> Result<&str, HttpError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id)
    } else {
        Err(HttpError::BadRequest("Invalid application id".to_string()))
    }
}

#[utoipa::path(
    get,
    path = "/api/internship/applications",
    tag = "Internship",
    security(("session_cookie" = [])),
    params(FindAllInternship),
    responses(
        (status = 200, description = "Paginated internship applications"),
        (status = 400, description = "Invalid query parameters", body = shared::errors::ErrorResponse),
        (status = 500, description = "Backend returned an unparsable body", body = shared::errors::ErrorResponse)
    )
)]
pub async fn get_applications(
    Extension(backend): Extension<DynBackendClient>,
    headers: HeaderMap,
    SimpleQuery(params): SimpleQuery<FindAllInternship>,
) -> Result<Response, HttpError> {
    let request = ProxyRequest::new(Method::GET, "/internships")
        .with_query(params.to_query())
        .with_cookie(forwarded_cookie(&headers));

    backend.forward(request).await?.ensure_json()?.into_relay()
}

#[utoipa::path(
    post,
    path = "/api/internship/applications/{id}",
    tag = "Internship",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Application id")),
    request_body(
        content = String,
        content_type = "application/json",
        description = "Optional JSON payload forwarded to the backend as-is"
    ),
    responses(
        (status = 200, description = "Mail queued by the backend"),
        (status = 400, description = "Invalid id or body", body = shared::errors::ErrorResponse)
    )
)]
pub async fn send_application_mail(
    Extension(backend): Extension<DynBackendClient>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    let id = application_id(&id)?;

    let payload = if body.is_empty() {
        None
    } else {
        let value = serde_json::from_slice::<Value>(&body)
            .map_err(|e| HttpError::BadRequest(format!("Invalid JSON body: {e}")))?;
        Some(value)
    };

    debug!("Forwarding send-mail for application {id}");

    let request = ProxyRequest::new(Method::POST, format!("/internship/{id}/send-mail"))
        .with_cookie(forwarded_cookie(&headers))
        .with_body(payload);

    backend.forward(request).await?.into_relay()
}

#[utoipa::path(
    patch,
    path = "/api/internship/applications/{id}",
    tag = "Internship",
    security(("session_cookie" = [])),
    params(("id" = String, Path, description = "Application id")),
    request_body = UpdateInternshipStatusRequest,
    responses(
        (status = 200, description = "Updated application"),
        (status = 400, description = "Missing status or invalid id", body = shared::errors::ErrorResponse)
    )
)]
pub async fn update_application_status(
    Extension(backend): Extension<DynBackendClient>,
    Path(id): Path<String>,
    headers: HeaderMap,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateInternshipStatusRequest>,
) -> Result<Response, HttpError> {
    let id = application_id(&id)?;

    let request = ProxyRequest::new(Method::PATCH, format!("/internship/{id}/status"))
        .with_cookie(forwarded_cookie(&headers))
        .with_body(Some(json!({ "status": body.status })));

    backend.forward(request).await?.into_relay()
}

pub fn internship_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/internship/applications", get(get_applications))
        .route(
            "/api/internship/applications/{id}",
            axum::routing::post(send_application_mail).patch(update_application_status),
        )
        .layer(Extension(app_state.di_container.backend_client.clone()))
}
