use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::domain;
use crate::shared::cache::CacheStatsSnapshot;
use crate::shared::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub entities: Vec<&'static str>,
    pub cache: CacheStatsSnapshot,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        entities: domain::views().iter().map(|v| v.slug).collect(),
        cache: state.cache_stats.snapshot(),
    })
}
