mod proxy;
mod revalidate;

pub use self::proxy::{INVALID_BACKEND_RESPONSE, ProxyRequest, ProxyResponse, UPSTREAM_FALLBACK};
pub use self::revalidate::RevalidateResponse;
