mod client;
mod error;
mod http;

pub use self::client::{ClientError, FALLBACK_MESSAGE, ValidationErrors, error_message};
pub use self::error::{ErrorResponse, MessageResponse};
pub use self::http::HttpError;
