use crate::{
    abstract_trait::{DynBackendClient, DynPageCache},
    cache::{MemoryPageCache, RedisPageCache},
    config::{Config, RouteGuardConfig},
    di::DependenciesInject,
    service::BackendClientService,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{RedisClient, RedisConfig};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub revalidate_secret: Option<String>,
    pub route_guard: Arc<RouteGuardConfig>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));

        let page_cache: DynPageCache = match &config.redis_url {
            Some(url) => {
                info!("Initializing Redis connection for the page cache");
                let redis = RedisClient::new(&RedisConfig::new(url.clone()))
                    .context("Failed to connect to Redis")?;
                redis.ping().await.context("Failed to ping Redis server")?;
                Arc::new(RedisPageCache::new(redis.pool))
            }
            None => {
                warn!("REDIS_URL not set, falling back to the in-memory page cache");
                Arc::new(MemoryPageCache::new())
            }
        };

        let backend_client: DynBackendClient = Arc::new(
            BackendClientService::new(&config.backend_api_url, registry.clone())
                .await
                .context("Failed to create backend client")?,
        );

        if config.revalidate_secret.is_none() {
            warn!("REVALIDATE_SECRET not set, every revalidation request will be rejected");
        }

        let di_container = DependenciesInject::new(backend_client, page_cache);

        Ok(Self::from_parts(
            di_container,
            registry,
            config.revalidate_secret.clone(),
            config.route_guard.clone(),
        ))
    }

    pub fn from_parts(
        di_container: DependenciesInject,
        registry: Arc<Mutex<Registry>>,
        revalidate_secret: Option<String>,
        route_guard: RouteGuardConfig,
    ) -> Self {
        Self {
            di_container,
            registry,
            revalidate_secret,
            route_guard: Arc::new(route_guard),
        }
    }
}
