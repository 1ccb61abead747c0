use std::time::Instant;

use contracts::shared::envelope::{Pagination, Success};

use crate::shared::error::ApiError;
use crate::shared::format::or_dash;
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::ViewDef;

pub fn paged<T>(data: Vec<T>, total: u64, spec: &QuerySpec) -> Success<Vec<T>> {
    Success::paged(data, Pagination::new(spec.page(), spec.limit(), total))
}

pub fn single<T>(data: T) -> Success<T> {
    Success::single(data)
}

/// Одно событие на операцию: entity, op, фильтры, число строк, время, статус.
/// Поля span'а запроса (request id, pattern) добавляет подписчик.
pub fn log_outcome<T>(
    view: &ViewDef,
    op: &'static str,
    summary: &str,
    started: Instant,
    result: &Result<T, ApiError>,
    count: impl FnOnce(&T) -> usize,
) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let filters = or_dash(summary);
    match result {
        Ok(value) => tracing::info!(
            entity = view.slug,
            op,
            filters,
            count = count(value),
            elapsed_ms,
            status = "ok",
            "operation completed"
        ),
        Err(e @ ApiError::Upstream { .. }) => tracing::error!(
            entity = view.slug,
            op,
            filters,
            elapsed_ms,
            status = e.kind(),
            error = %e,
            "operation failed"
        ),
        Err(e) => tracing::warn!(
            entity = view.slug,
            op,
            filters,
            elapsed_ms,
            status = e.kind(),
            error = %e,
            "operation failed"
        ),
    }
}
