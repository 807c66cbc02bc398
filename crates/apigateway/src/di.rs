use crate::abstract_trait::{DynBackendClient, DynPageCache};

#[derive(Clone)]
pub struct DependenciesInject {
    pub backend_client: DynBackendClient,
    pub page_cache: DynPageCache,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("backend_client", &"DynBackendClient")
            .field("page_cache", &"DynPageCache")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(backend_client: DynBackendClient, page_cache: DynPageCache) -> Self {
        Self {
            backend_client,
            page_cache,
        }
    }
}
