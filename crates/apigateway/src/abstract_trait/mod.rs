mod backend;
mod page_cache;

pub use self::backend::{BackendClientTrait, DynBackendClient};
pub use self::page_cache::{DynPageCache, PageCacheTrait};
