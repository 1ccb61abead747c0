//! Typed operations shared by every entity: HTTP handlers and the
//! message listener both come here.

use std::time::Instant;

use contracts::shared::envelope::{CountResult, Success};
use serde::de::DeserializeOwned;

use crate::shared::cache::{cache_key, read_through};
use crate::shared::envelope::{self, log_outcome};
use crate::shared::error::ApiError;
use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::executor::Row;
use crate::shared::query::service::{self as raw, PagedRows};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::ViewDef;
use crate::shared::state::AppState;

/// Страница записей с пагинацией; кэшируемые представления читаются через кэш
pub async fn list<E: Entity>(
    state: &AppState,
    filter: &E::Filter,
) -> Result<Success<Vec<E::Record>>, ApiError> {
    let view = E::view();
    let spec = filter.to_spec();
    let started = Instant::now();

    let result = fetch_list::<E>(state, view, &spec).await;
    log_outcome(view, "findAll", &spec.summary(), started, &result, |r| {
        r.data.len()
    });
    result
}

async fn fetch_list<E: Entity>(
    state: &AppState,
    view: &'static ViewDef,
    spec: &QuerySpec,
) -> Result<Success<Vec<E::Record>>, ApiError> {
    spec.validate(state.max_limit)
        .map_err(|e| ApiError::from_query(view, e))?;
    let exec = state.executor(view.store);

    let page: PagedRows = if view.cached {
        let key = cache_key(view, spec);
        read_through(
            state.cache.as_ref(),
            &state.cache_stats,
            &key,
            state.cache_ttl,
            || raw::fetch_page(exec, view, spec),
        )
        .await?
    } else {
        raw::fetch_page(exec, view, spec).await?
    };

    let records = page
        .rows
        .into_iter()
        .map(|row| decode::<E::Record>(view, row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(envelope::paged(records, page.total, spec))
}

pub async fn count<E: Entity>(
    state: &AppState,
    filter: &E::Filter,
) -> Result<Success<CountResult>, ApiError> {
    let view = E::view();
    let spec = filter.to_spec();
    let started = Instant::now();

    let result = raw::fetch_count(state.executor(view.store), view, &spec)
        .await
        .map(|total| envelope::single(CountResult { total }));
    log_outcome(view, "getCount", &spec.summary(), started, &result, |_| 1);
    result
}

pub async fn get_by_id<E: Entity>(
    state: &AppState,
    id: &str,
) -> Result<Success<E::Record>, ApiError> {
    let view = E::view();
    let started = Instant::now();

    let result = match raw::fetch_by_id(state.executor(view.store), view, id).await {
        Ok(row) => decode::<E::Record>(view, row).map(envelope::single),
        Err(e) => Err(e),
    };
    log_outcome(view, "findById", &format!("id={}", id), started, &result, |_| 1);
    result
}

/// Lookup by an alternate key declared on the view (`code`, `number`, ...)
pub async fn find_by<E: Entity>(
    state: &AppState,
    field: &str,
    value: &str,
) -> Result<Success<E::Record>, ApiError> {
    let view = E::view();
    let started = Instant::now();
    let op = view.lookup(field).map(|l| l.pattern).unwrap_or("findBy");

    let result = match raw::fetch_by_lookup(state.executor(view.store), view, field, value).await
    {
        Ok(row) => decode::<E::Record>(view, row).map(envelope::single),
        Err(e) => Err(e),
    };
    log_outcome(
        view,
        op,
        &format!("{}={}", field, value),
        started,
        &result,
        |_| 1,
    );
    result
}

/// Row → typed record; a row that does not fit the record is an upstream fault
fn decode<T: DeserializeOwned>(view: &ViewDef, row: Row) -> Result<T, ApiError> {
    serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| {
        ApiError::upstream(format!("Failed to retrieve {} records", view.entity), e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use contracts::domain::a002_branch::aggregate::BranchQuery;
    use contracts::domain::a005_purchase_order::aggregate::PurchaseOrderQuery;
    use serde_json::json;

    use crate::domain::a002_branch::repository::Branches;
    use crate::domain::a005_purchase_order::repository::PurchaseOrders;
    use crate::domain::a006_sales_order::repository::SalesOrders;
    use crate::shared::cache::testing::FailingCache;
    use crate::shared::cache::{CacheStore, DisabledCache, MokaCache};
    use crate::shared::query::testing::{is_count, rows, total, MockExecutor};

    fn branch_rows() -> MockExecutor {
        MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(2))
            } else {
                Ok(rows(vec![
                    json!({"organization_id": "101", "branch_code": "B001", "branch_name": "Main"}),
                    json!({"organization_id": 102, "branch_code": "B002", "branch_name": "North", "phone": null}),
                ]))
            }
        })
    }

    fn state(exec: Arc<MockExecutor>, cache: Arc<dyn CacheStore>) -> AppState {
        AppState::for_tests(exec, cache)
    }

    #[tokio::test]
    async fn test_list_returns_typed_records_and_pagination() {
        let exec = Arc::new(MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(2))
            } else {
                Ok(rows(vec![
                    json!({"organization_id": "101", "branch_code": "B001", "branch_name": "Main"}),
                    json!({"organization_id": 102, "branch_code": "B002", "branch_name": "North"}),
                ]))
            }
        }));
        let st = state(exec, Arc::new(DisabledCache));

        let body = list::<Branches>(&st, &BranchQuery::default()).await.unwrap();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].organization_id, 101);
        let pagination = body.pagination.unwrap();
        assert_eq!((pagination.page, pagination.limit), (1, 10));
        assert_eq!(pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_branch_list_is_served_from_cache() {
        let exec = Arc::new(branch_rows());
        let st = state(exec.clone(), Arc::new(MokaCache::new(100)));
        let filter = BranchQuery {
            branch_name: Some("main".into()),
            ..Default::default()
        };

        let first = list::<Branches>(&st, &filter).await.unwrap();
        let second = list::<Branches>(&st, &filter).await.unwrap();

        assert_eq!(first.data, second.data);
        // data + count, только на первый запрос
        assert_eq!(exec.calls().len(), 2);
        let stats = st.cache_stats.snapshot();
        assert_eq!((stats.hits, stats.misses), (1, 1));

        // другой фильтр, другой ключ
        let other = BranchQuery {
            branch_name: Some("north".into()),
            ..Default::default()
        };
        list::<Branches>(&st, &other).await.unwrap();
        assert_eq!(exec.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_failing_cache_matches_disabled_cache() {
        let filter = BranchQuery::default();

        let failing = state(Arc::new(branch_rows()), Arc::new(FailingCache));
        let disabled = state(Arc::new(branch_rows()), Arc::new(DisabledCache));

        let a = list::<Branches>(&failing, &filter).await.unwrap();
        let b = list::<Branches>(&disabled, &filter).await.unwrap();
        assert_eq!(a.data, b.data);
        assert_eq!(a.pagination, b.pagination);
        assert_eq!(failing.cache_stats.snapshot().errors, 2);
    }

    #[tokio::test]
    async fn test_limit_above_max_is_rejected_before_query() {
        let exec = Arc::new(branch_rows());
        let st = state(exec.clone(), Arc::new(DisabledCache));
        let filter = BranchQuery {
            limit: Some(5000),
            ..Default::default()
        };

        let err = list::<Branches>(&st, &filter).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(err.failure().message, "Invalid Branch query");
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_date_range_is_rejected() {
        let exec = Arc::new(MockExecutor::new(|_| Ok(Vec::new())));
        let st = state(exec, Arc::new(DisabledCache));
        let filter = PurchaseOrderQuery {
            date_from: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
            date_to: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let err = list::<PurchaseOrders>(&st, &filter).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_row_that_does_not_fit_record_is_upstream_error() {
        let exec = Arc::new(MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(1))
            } else {
                Ok(rows(vec![json!({"organization_id": "not-a-number"})]))
            }
        }));
        let st = state(exec, Arc::new(DisabledCache));
        let err = list::<Branches>(&st, &BranchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream { .. }));
        assert_eq!(err.failure().message, "Failed to retrieve Branch records");
    }

    #[tokio::test]
    async fn test_count_envelope() {
        let exec = Arc::new(MockExecutor::new(|_| Ok(total(42))));
        let st = state(exec, Arc::new(DisabledCache));
        let body = count::<Branches>(&st, &BranchQuery::default())
            .await
            .unwrap();
        assert_eq!(body.data.total, 42);
        assert!(body.pagination.is_none());
    }

    #[tokio::test]
    async fn test_sales_order_by_id_is_grouped() {
        let exec = Arc::new(MockExecutor::new(|_| {
            Ok(rows(vec![
                json!({"header_id": 5, "order_number": "10045", "line_number": 2, "ordered_item": "B", "ordered_quantity": "3"}),
                json!({"header_id": 5, "order_number": "10045", "line_number": 1, "ordered_item": "A", "ordered_quantity": 1}),
            ]))
        }));
        let st = state(exec, Arc::new(DisabledCache));

        let body = get_by_id::<SalesOrders>(&st, "5").await.unwrap();
        let order = body.data;
        assert_eq!(order.header_id, 5);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].line_number, 1);
        assert_eq!(order.lines[1].ordered_quantity, Some(3.0));
    }

    #[tokio::test]
    async fn test_find_branch_by_code() {
        let exec = Arc::new(branch_rows());
        let st = state(exec.clone(), Arc::new(DisabledCache));

        let body = find_by::<Branches>(&st, "code", "b001").await.unwrap();
        assert_eq!(body.data.branch_code, "B001");

        let err = find_by::<Branches>(&st, "phone", "555").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
