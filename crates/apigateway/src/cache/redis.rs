use super::{page_key, tag_key};
use crate::abstract_trait::PageCacheTrait;
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Clone)]
pub struct RedisPageCache {
    pub pool: Arc<Pool>,
}

impl RedisPageCache {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn get_conn(&self) -> Result<Connection, HttpError> {
        self.pool.get().await.map_err(|e| {
            error!("Failed to get Redis connection from pool: {:?}", e);
            HttpError::Internal("Page cache unavailable".to_string())
        })
    }
}

fn cache_error(action: &str, key: &str, e: deadpool_redis::redis::RedisError) -> HttpError {
    error!("Failed to {action} {key}: {:?}", e);
    HttpError::Internal("Page cache unavailable".to_string())
}

#[async_trait]
impl PageCacheTrait for RedisPageCache {
    async fn store_page(&self, path: &str, tags: &[String], body: &str) -> Result<(), HttpError> {
        let mut conn = self.get_conn().await?;
        let key = page_key(path);

        let _: () = conn
            .set(&key, body)
            .await
            .map_err(|e| cache_error("store", &key, e))?;

        for tag in tags {
            let tag_key = tag_key(tag);
            let _: () = conn
                .sadd(&tag_key, path)
                .await
                .map_err(|e| cache_error("tag", &tag_key, e))?;
        }

        debug!("Page cached: {}", path);
        Ok(())
    }

    async fn cached_page(&self, path: &str) -> Result<Option<String>, HttpError> {
        let mut conn = self.get_conn().await?;
        let key = page_key(path);

        conn.get(&key)
            .await
            .map_err(|e| cache_error("read", &key, e))
    }

    async fn revalidate_path(&self, path: &str) -> Result<(), HttpError> {
        let mut conn = self.get_conn().await?;
        let key = page_key(path);

        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| cache_error("delete", &key, e))?;

        debug!("Revalidated path: {}", path);
        Ok(())
    }

    async fn revalidate_tag(&self, tag: &str) -> Result<(), HttpError> {
        let mut conn = self.get_conn().await?;
        let key = tag_key(tag);

        let paths: Vec<String> = conn
            .smembers(&key)
            .await
            .map_err(|e| cache_error("read members of", &key, e))?;

        let mut keys: Vec<String> = paths.iter().map(|path| page_key(path)).collect();
        keys.push(key.clone());

        let _: () = conn
            .del(&keys)
            .await
            .map_err(|e| cache_error("delete pages of", &key, e))?;

        debug!("Revalidated tag {} ({} pages)", tag, paths.len());
        Ok(())
    }
}
