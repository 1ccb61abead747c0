//! Filtered-paginated query path over raw rows.
//!
//! Типизация записей и конверт ответа живут уровнем выше,
//! в `domain::service`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::builder::{QueryParam, SqlBuilder};
use super::error::QueryError;
use super::executor::{Executor, Row};
use super::grouper::RowGrouper;
use super::spec::QuerySpec;
use super::view::{FilterMode, KeyKind, ViewDef};
use crate::shared::error::ApiError;

/// Paged Result: one page of rows (or grouped records) plus the total count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedRows {
    pub rows: Vec<Row>,
    pub total: u64,
}

fn upstream(view: &ViewDef, err: anyhow::Error) -> ApiError {
    ApiError::upstream(format!("Failed to retrieve {} records", view.entity), err)
}

fn query_error(view: &ViewDef, err: QueryError) -> ApiError {
    ApiError::from_query(view, err)
}

/// Data and count queries run concurrently; no snapshot is shared between them
pub async fn fetch_page(
    exec: &dyn Executor,
    view: &ViewDef,
    spec: &QuerySpec,
) -> Result<PagedRows, ApiError> {
    let builder = SqlBuilder::new(view, exec.dialect());
    let count = builder
        .build_count(spec)
        .map_err(|e| query_error(view, e))?;

    let Some(group) = &view.group else {
        let page = builder
            .build_page(spec)
            .map_err(|e| query_error(view, e))?;
        let (rows, total) = tokio::try_join!(exec.query(&page), exec.count(&count))
            .map_err(|e| upstream(view, e))?;
        return Ok(PagedRows { rows, total });
    };

    // Страница считается в родительских записях, не в строках
    let key_page = builder
        .build_key_page(spec)
        .map_err(|e| query_error(view, e))?;
    let (key_rows, total) = tokio::try_join!(exec.query(&key_page), exec.count(&count))
        .map_err(|e| upstream(view, e))?;

    let keys: Vec<QueryParam> = key_rows
        .iter()
        .filter_map(|row| row.get(group.parent_key))
        .filter_map(|v| key_param(view.key_kind, v))
        .collect();
    if keys.is_empty() {
        return Ok(PagedRows {
            rows: Vec::new(),
            total,
        });
    }

    let lines = builder
        .build_lines(spec, &keys)
        .map_err(|e| query_error(view, e))?;
    let flat = exec.query(&lines).await.map_err(|e| upstream(view, e))?;
    let rows = RowGrouper::new(group)
        .build(flat)
        .map_err(|e| ApiError::from_group(view, e))?;

    Ok(PagedRows { rows, total })
}

pub async fn fetch_count(
    exec: &dyn Executor,
    view: &ViewDef,
    spec: &QuerySpec,
) -> Result<u64, ApiError> {
    let count = SqlBuilder::new(view, exec.dialect())
        .build_count(spec)
        .map_err(|e| query_error(view, e))?;
    exec.count(&count).await.map_err(|e| upstream(view, e))
}

/// Single record by primary key; grouped views return the grouped record
pub async fn fetch_by_id(exec: &dyn Executor, view: &ViewDef, id: &str) -> Result<Row, ApiError> {
    let param = id_param(view.key_kind, id).map_err(|e| query_error(view, e))?;
    let query = SqlBuilder::new(view, exec.dialect()).build_by_column(
        view.key_column,
        FilterMode::Exact,
        param,
    );
    let rows = exec.query(&query).await.map_err(|e| upstream(view, e))?;
    first_record(view, rows)?.ok_or_else(|| {
        ApiError::not_found(
            format!("{} not found", view.entity),
            format!("{}={}", view.key_column, id.trim()),
        )
    })
}

/// First record matching an alternate key, e.g. branch by code
pub async fn fetch_by_lookup(
    exec: &dyn Executor,
    view: &ViewDef,
    field: &str,
    value: &str,
) -> Result<Row, ApiError> {
    let lookup = view
        .lookup(field)
        .ok_or_else(|| query_error(view, QueryError::UnknownLookup(field.to_string())))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(query_error(
            view,
            QueryError::Invalid(format!("{} must not be empty", field)),
        ));
    }

    let query = SqlBuilder::new(view, exec.dialect()).build_by_column(
        lookup.column,
        lookup.mode,
        QueryParam::Text(value.to_string()),
    );
    let rows = exec.query(&query).await.map_err(|e| upstream(view, e))?;
    first_record(view, rows)?.ok_or_else(|| {
        ApiError::not_found(
            format!("{} not found", view.entity),
            format!("{}={}", field, value),
        )
    })
}

/// `None` for "no matching parent", grouping errors stay errors
fn first_record(view: &ViewDef, rows: Vec<Row>) -> Result<Option<Row>, ApiError> {
    if rows.is_empty() {
        return Ok(None);
    }
    match &view.group {
        Some(group) => Ok(RowGrouper::new(group)
            .build(rows)
            .map_err(|e| ApiError::from_group(view, e))?
            .into_iter()
            .next()),
        None => Ok(rows.into_iter().next()),
    }
}

fn id_param(kind: KeyKind, id: &str) -> Result<QueryParam, QueryError> {
    let id = id.trim();
    match kind {
        KeyKind::Integer => id
            .parse::<i64>()
            .map(QueryParam::Integer)
            .map_err(|_| QueryError::InvalidId(id.to_string())),
        KeyKind::Text if id.is_empty() => Err(QueryError::InvalidId(id.to_string())),
        KeyKind::Text => Ok(QueryParam::Text(id.to_string())),
    }
}

/// Parent key from a key-page row; DECIMAL keys may arrive as strings
fn key_param(kind: KeyKind, value: &Value) -> Option<QueryParam> {
    match (kind, value) {
        (_, Value::Number(n)) => n
            .as_i64()
            .map(QueryParam::Integer)
            .or_else(|| n.as_f64().map(QueryParam::Numeric)),
        (KeyKind::Integer, Value::String(s)) => s.trim().parse().ok().map(QueryParam::Integer),
        (KeyKind::Text, Value::String(s)) => Some(QueryParam::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::testing::{is_count, rows, total, MockExecutor};
    use crate::shared::query::view::{FilterColumn, GroupSpec, Lookup, Store};
    use serde_json::json;

    static BRANCHES: ViewDef = ViewDef {
        entity: "Branch",
        slug: "branch",
        store: Store::Erp,
        source: "XTD_INV_BRANCHES_V",
        columns: &["organization_id", "branch_code", "branch_name"],
        key_column: "organization_id",
        key_kind: KeyKind::Integer,
        order_key: "organization_id",
        filters: &[FilterColumn {
            key: "branch_name",
            column: "branch_name",
            mode: FilterMode::LikeCi,
        }],
        lookups: &[Lookup {
            field: "code",
            column: "branch_code",
            mode: FilterMode::EqCi,
            pattern: "findByCode",
        }],
        group: None,
        cached: true,
    };

    static ORDERS: ViewDef = ViewDef {
        entity: "Sales order",
        slug: "sales-order",
        store: Store::Erp,
        source: "XTD_OE_ORDERS_LINES_V",
        columns: &["header_id", "order_number", "line_number", "ordered_item"],
        key_column: "header_id",
        key_kind: KeyKind::Integer,
        order_key: "header_id",
        filters: &[FilterColumn {
            key: "order_number",
            column: "order_number",
            mode: FilterMode::Exact,
        }],
        lookups: &[],
        group: Some(GroupSpec {
            parent_key: "header_id",
            parent_columns: &["header_id", "order_number"],
            children_field: "lines",
            child_columns: &[("line_number", "line_number"), ("ordered_item", "ordered_item")],
            line_column: "line_number",
        }),
        cached: false,
    };

    #[tokio::test]
    async fn test_page_and_count_share_predicate() {
        let exec = MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(25))
            } else {
                Ok(rows(vec![
                    json!({"organization_id": 1, "branch_code": "B001"}),
                    json!({"organization_id": 2, "branch_code": "B002"}),
                ]))
            }
        });
        let spec = QuerySpec::new(Some(2), Some(2)).text("branch_name", Some("main"));
        let page = fetch_page(&exec, &BRANCHES, &spec).await.unwrap();

        assert_eq!(page.total, 25);
        assert_eq!(page.rows.len(), 2);

        let calls = exec.calls();
        assert_eq!(calls.len(), 2);
        let data = calls.iter().find(|q| !is_count(q)).unwrap();
        let count = calls.iter().find(|q| is_count(q)).unwrap();
        assert_eq!(count.params, data.params[..1].to_vec());
        assert!(!count.sql.contains("FETCH"));
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_retrieval_error() {
        let exec = MockExecutor::failing("ORA-12541: TNS:no listener");
        let err = fetch_page(&exec, &BRANCHES, &QuerySpec::default())
            .await
            .unwrap_err();
        let failure = err.failure();
        assert_eq!(failure.message, "Failed to retrieve Branch records");
        assert!(failure.error.contains("ORA-12541"));
    }

    #[tokio::test]
    async fn test_grouped_page_counts_parents() {
        let exec = MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(3))
            } else if q.sql.starts_with("SELECT DISTINCT") {
                Ok(rows(vec![json!({"header_id": "101"}), json!({"header_id": 102})]))
            } else {
                Ok(rows(vec![
                    json!({"header_id": 101, "order_number": "SO-1", "line_number": 2, "ordered_item": "B"}),
                    json!({"header_id": 101, "order_number": "SO-1", "line_number": 1, "ordered_item": "A"}),
                    json!({"header_id": 102, "order_number": "SO-2", "line_number": 1, "ordered_item": "C"}),
                ]))
            }
        });
        let spec = QuerySpec::new(Some(1), Some(2));
        let page = fetch_page(&exec, &ORDERS, &spec).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(
            page.rows[0]["lines"],
            json!([
                {"line_number": 1, "ordered_item": "A"},
                {"line_number": 2, "ordered_item": "B"}
            ])
        );

        let lines = exec
            .calls()
            .into_iter()
            .find(|q| q.sql.contains(" IN ("))
            .unwrap();
        assert_eq!(
            lines.params,
            vec![QueryParam::Integer(101), QueryParam::Integer(102)]
        );
    }

    #[tokio::test]
    async fn test_grouped_page_without_parents_skips_line_query() {
        let exec = MockExecutor::new(|q| {
            if is_count(q) {
                Ok(total(0))
            } else {
                Ok(Vec::new())
            }
        });
        let page = fetch_page(&exec, &ORDERS, &QuerySpec::default())
            .await
            .unwrap();
        assert_eq!(page, PagedRows::default());
        assert_eq!(exec.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_count_only() {
        let exec = MockExecutor::new(|_| Ok(rows(vec![json!({"total": "7"})])));
        let n = fetch_count(&exec, &BRANCHES, &QuerySpec::default())
            .await
            .unwrap();
        assert_eq!(n, 7);
    }

    #[tokio::test]
    async fn test_by_id_not_found_and_invalid() {
        let exec = MockExecutor::new(|_| Ok(Vec::new()));
        let err = fetch_by_id(&exec, &BRANCHES, "42").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.failure().message, "Branch not found");

        let err = fetch_by_id(&exec, &BRANCHES, "abc").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        // невалидный id не доходит до базы
        assert_eq!(exec.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_by_id_returns_grouped_record() {
        let exec = MockExecutor::new(|_| {
            Ok(rows(vec![
                json!({"header_id": 7, "order_number": "SO-7", "line_number": 1, "ordered_item": "A"}),
                json!({"header_id": 7, "order_number": "SO-7", "line_number": 2, "ordered_item": "B"}),
            ]))
        });
        let record = fetch_by_id(&exec, &ORDERS, " 7 ").await.unwrap();
        assert_eq!(record["order_number"], json!("SO-7"));
        assert_eq!(record["lines"].as_array().unwrap().len(), 2);
        assert_eq!(exec.calls()[0].params, vec![QueryParam::Integer(7)]);
    }

    #[tokio::test]
    async fn test_lookup_by_alternate_key() {
        let exec = MockExecutor::new(|_| {
            Ok(rows(vec![json!({"organization_id": 1, "branch_code": "B001"})]))
        });
        let record = fetch_by_lookup(&exec, &BRANCHES, "code", "b001").await.unwrap();
        assert_eq!(record["branch_code"], json!("B001"));

        let call = &exec.calls()[0];
        assert!(call.sql.contains("WHERE UPPER(branch_code) = UPPER(:1)"));
        assert_eq!(call.params, vec![QueryParam::Text("b001".into())]);
    }

    #[tokio::test]
    async fn test_unknown_lookup_is_not_found() {
        let exec = MockExecutor::new(|_| Ok(Vec::new()));
        let err = fetch_by_lookup(&exec, &BRANCHES, "phone", "123")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert!(exec.calls().is_empty());
    }
}
