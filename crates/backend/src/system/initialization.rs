use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::shared::cache::{CacheStats, CacheStore, DisabledCache, MokaCache};
use crate::shared::config::{CacheConfig, Config};
use crate::shared::data::db::SeaOrmExecutor;
use crate::shared::state::AppState;

/// Подключение к обеим базам и сборка общего состояния
pub async fn initialize_state(config: &Config) -> anyhow::Result<AppState> {
    let erp = SeaOrmExecutor::connect(&config.erp.url)
        .await
        .context("ERP store init failed")?;
    let auth = SeaOrmExecutor::connect(&config.auth.url)
        .await
        .context("AUTH store init failed")?;

    Ok(AppState {
        erp: Arc::new(erp),
        auth: Arc::new(auth),
        cache: build_cache(&config.cache),
        cache_stats: Arc::new(CacheStats::default()),
        cache_ttl: Duration::from_secs(config.cache.ttl_secs),
        max_limit: config.query.max_limit,
    })
}

pub fn build_cache(config: &CacheConfig) -> Arc<dyn CacheStore> {
    if config.enabled {
        tracing::info!(
            "Cache enabled: ttl={}s, max_entries={}",
            config.ttl_secs,
            config.max_entries
        );
        Arc::new(MokaCache::new(config.max_entries))
    } else {
        tracing::info!("Cache disabled");
        Arc::new(DisabledCache)
    }
}
