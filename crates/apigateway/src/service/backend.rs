use crate::{
    abstract_trait::BackendClientTrait,
    domain::response::{ProxyRequest, ProxyResponse},
};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use reqwest::{
    Client,
    header::{ACCEPT, CACHE_CONTROL, COOKIE, HeaderMap, HeaderName, HeaderValue},
};
use shared::{
    errors::HttpError,
    utils::{HeaderInjector, Method, Metrics, Status as StatusUtils, TracingContext},
};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};
use uuid::Uuid;

pub const BACKEND_UNREACHABLE: &str = "Failed to reach backend";

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Forwards proxied calls to the backend API over HTTP.
#[derive(Debug)]
pub struct BackendClientService {
    http: Client,
    base_url: String,
    metrics: Metrics,
}

impl BackendClientService {
    pub async fn new(base_url: &str, registry: Arc<Mutex<Registry>>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build backend HTTP client")?;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "backend_client", "backend API");

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            metrics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("backend-client")
    }

    fn inject_trace_context(&self, cx: &Context, headers: &mut HeaderMap) {
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(cx, &mut HeaderInjector(headers))
        });
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Client)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing_success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete_tracing_internal(tracing_ctx, method, true, message);
    }

    fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    fn outbound_headers(&self, request: &ProxyRequest, cx: &Context) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Ok(request_id) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            headers.insert(REQUEST_ID, request_id);
        }

        if let Some(cookie) = &request.cookie {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    headers.insert(COOKIE, value);
                }
                Err(e) => error!("Dropping unforwardable cookie header: {e}"),
            }
        }

        self.inject_trace_context(cx, &mut headers);
        headers
    }
}

#[async_trait]
impl BackendClientTrait for BackendClientService {
    async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, HttpError> {
        let method = Method::from(&request.method);
        let operation = format!("{} {}", request.method, request.path);

        let tracing_ctx = self.start_tracing(
            "ForwardToBackend",
            vec![
                KeyValue::new("http.method", request.method.to_string()),
                KeyValue::new("backend.path", request.path.clone()),
                KeyValue::new("cookie.forwarded", request.cookie.is_some()),
            ],
        );

        let headers = self.outbound_headers(&request, &tracing_ctx.cx);

        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .headers(headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                self.complete_tracing_error(&tracing_ctx, method, &format!("{operation}: {e}"));
                return Err(HttpError::BadGateway(BACKEND_UNREACHABLE.to_string()));
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("{operation}: failed to read body: {e}"),
                );
                return Err(HttpError::BadGateway(BACKEND_UNREACHABLE.to_string()));
            }
        };

        if status.is_success() {
            self.complete_tracing_success(&tracing_ctx, method, &format!("{operation} -> {status}"));
        } else {
            self.complete_tracing_error(&tracing_ctx, method, &format!("{operation} -> {status}"));
        }

        Ok(ProxyResponse {
            status,
            content_type,
            body,
        })
    }
}
