//! Cache-aside read path.
//!
//! Кэш только оптимизация: любая ошибка чтения/записи логируется
//! и запрос уходит в живой источник.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::shared::error::ApiError;
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::ViewDef;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Key-value cache collaborator
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}

#[derive(Clone)]
struct CachedValue {
    body: String,
    ttl: Duration,
}

/// Срок жизни задаётся на каждую запись
struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process TTL cache
pub struct MokaCache {
    cache: Cache<String, CachedValue>,
}

impl MokaCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryExpiry)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl CacheStore for MokaCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.cache.get(key).await.map(|v| v.body))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.cache
            .insert(key.to_string(), CachedValue { body: value, ttl })
            .await;
        Ok(())
    }
}

/// `cache.enabled = false`
pub struct DisabledCache;

#[async_trait]
impl CacheStore for DisabledCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Process-wide cache counters, reported on /health
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// `<slug>:<sha256 of the effective query>`; filters in declared order
pub fn cache_key(view: &ViewDef, spec: &QuerySpec) -> String {
    let filters: Vec<serde_json::Value> = view
        .filters
        .iter()
        .filter_map(|f| spec.get(f.key).map(|v| serde_json::json!([f.key, v])))
        .collect();
    let canonical = serde_json::json!({
        "filters": filters,
        "page": spec.page(),
        "limit": spec.limit(),
    });
    let digest = Sha256::digest(canonical.to_string().as_bytes());
    format!("{}:{:x}", view.slug, digest)
}

/// MISS → FETCH → STORE(ttl) → RETURN, HIT → RETURN(cached)
pub async fn read_through<T, F, Fut>(
    cache: &dyn CacheStore,
    stats: &CacheStats,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<T, ApiError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match cache.get(key).await {
        Ok(Some(body)) => match serde_json::from_str::<T>(&body) {
            Ok(value) => {
                stats.hit();
                tracing::debug!(key, "cache hit");
                return Ok(value);
            }
            Err(e) => {
                stats.error();
                tracing::warn!(key, error = %e, "cached payload is unreadable, falling through");
            }
        },
        Ok(None) => {
            stats.miss();
            tracing::debug!(key, "cache miss");
        }
        Err(e) => {
            stats.error();
            tracing::warn!(key, error = %e, "cache read failed, falling through");
        }
    }

    let value = fetch().await?;

    match serde_json::to_string(&value) {
        Ok(body) => {
            if let Err(e) = cache.set(key, body, ttl).await {
                stats.error();
                tracing::warn!(key, error = %e, "cache write failed");
            }
        }
        Err(e) => {
            stats.error();
            tracing::warn!(key, error = %e, "value is not cacheable");
        }
    }

    Ok(value)
}
