mod config;
mod http;
mod interceptor;
mod notices;

pub use self::config::{API_PREFIX, ClientConfig, DEFAULT_ORIGIN, RuntimeContext, resolve_base_url};
pub use self::http::ApiClient;
pub use self::interceptor::{SESSION_EXPIRED_MESSAGE, SessionExpiryHandler};
pub use self::notices::report_error;
