use crate::abstract_trait::{DynUnauthorizedHandler, UnauthorizedHandlerTrait};
use reqwest::{Client, Method, StatusCode, Url, cookie::Jar};
use serde::{Serialize, de::DeserializeOwned};
use shared::errors::ClientError;
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, warn};

use super::config::ClientConfig;

type WeakHandler = Weak<dyn UnauthorizedHandlerTrait + Send + Sync>;

/// The single outbound path to the remote API.
///
/// Cookies set by the API (the HTTP-only session cookie) are kept in a shared
/// jar and sent on every request. A `401` is reported to the installed
/// unauthorized handler before the error is returned to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    cookies: Arc<Jar>,
    on_unauthorized: Arc<OnceLock<WeakHandler>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_unauthorized_handler", &self.on_unauthorized.get().is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let cookies = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(cookies.clone())
            .build()?;

        debug!("API client targeting {base_url}");

        Ok(Self {
            http,
            base_url,
            cookies,
            on_unauthorized: Arc::new(OnceLock::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookies
    }

    /// Installs the `401` handler. Only a weak reference is kept, so the
    /// handler may own clones of this client. Returns `false` if one was
    /// already installed.
    pub fn set_unauthorized_handler(&self, handler: &DynUnauthorizedHandler) -> bool {
        self.on_unauthorized.set(Arc::downgrade(handler)).is_ok()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // The body of a 401 is never read, so a broken one still expires the session.
        if status == StatusCode::UNAUTHORIZED {
            warn!("{method} {path} returned 401");
            self.notify_unauthorized().await;
            return Err(ClientError::Unauthorized);
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            debug!("{method} {path} failed with {status}");
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }

        // Empty bodies (204, bare 200) decode as JSON null so `()` works.
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        Ok(serde_json::from_slice(payload)?)
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))
    }

    async fn notify_unauthorized(&self) {
        if let Some(handler) = self.on_unauthorized.get().and_then(Weak::upgrade) {
            handler.on_unauthorized().await;
        }
    }
}
