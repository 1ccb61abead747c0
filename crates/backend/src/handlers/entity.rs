//! Generic REST handlers; one set of routes per entity is mounted in
//! `routes::mount`.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::shared::envelope::{CountResult, Success};

use crate::domain::service;
use crate::shared::error::ApiError;
use crate::shared::query::entity::Entity;
use crate::shared::state::AppState;

fn rejected<E: Entity>(text: String) -> ApiError {
    ApiError::validation(format!("Invalid {} query", E::view().entity), text)
}

fn filter_of<E: Entity>(
    query: Result<Query<E::Filter>, QueryRejection>,
) -> Result<E::Filter, ApiError> {
    query
        .map(|Query(filter)| filter)
        .map_err(|e| rejected::<E>(e.body_text()))
}

/// GET /api/<slug>
pub async fn list<E: Entity>(
    State(state): State<AppState>,
    query: Result<Query<E::Filter>, QueryRejection>,
) -> Result<Json<Success<Vec<E::Record>>>, ApiError> {
    let filter = filter_of::<E>(query)?;
    service::list::<E>(&state, &filter).await.map(Json)
}

/// GET /api/<slug>/count
pub async fn count<E: Entity>(
    State(state): State<AppState>,
    query: Result<Query<E::Filter>, QueryRejection>,
) -> Result<Json<Success<CountResult>>, ApiError> {
    let filter = filter_of::<E>(query)?;
    service::count::<E>(&state, &filter).await.map(Json)
}

/// GET /api/<slug>/:id
pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Success<E::Record>>, ApiError> {
    let Path(id) = path.map_err(|e| rejected::<E>(e.body_text()))?;
    service::get_by_id::<E>(&state, &id).await.map(Json)
}

/// GET /api/<slug>/:field/:value
pub async fn find_by_field<E: Entity>(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Success<E::Record>>, ApiError> {
    let Path((field, value)) = path.map_err(|e| rejected::<E>(e.body_text()))?;
    service::find_by::<E>(&state, &field, &value).await.map(Json)
}
