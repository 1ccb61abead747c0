use std::sync::Arc;
use std::time::Duration;

use crate::shared::cache::{CacheStats, CacheStore};
use crate::shared::query::executor::Executor;
use crate::shared::query::view::Store;

/// Shared by HTTP handlers and the message listener
#[derive(Clone)]
pub struct AppState {
    pub erp: Arc<dyn Executor>,
    pub auth: Arc<dyn Executor>,
    pub cache: Arc<dyn CacheStore>,
    pub cache_stats: Arc<CacheStats>,
    pub cache_ttl: Duration,
    pub max_limit: u64,
}

impl AppState {
    pub fn executor(&self, store: Store) -> &dyn Executor {
        match store {
            Store::Erp => self.erp.as_ref(),
            Store::Auth => self.auth.as_ref(),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Both stores answered by one executor, defaults from config
    pub fn for_tests(exec: Arc<dyn Executor>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            erp: exec.clone(),
            auth: exec,
            cache,
            cache_stats: Arc::new(CacheStats::default()),
            cache_ttl: Duration::from_secs(3600),
            max_limit: 1000,
        }
    }
}
