use async_trait::async_trait;
use serde_json::Value;

use super::builder::{BuiltQuery, Dialect};

/// Row from the database, keyed by lower-cased column name
pub type Row = serde_json::Map<String, Value>;

/// Database collaborator: SQL text + positional params in, ordered rows out
#[async_trait]
pub trait Executor: Send + Sync {
    fn dialect(&self) -> Dialect;

    async fn query(&self, query: &BuiltQuery) -> anyhow::Result<Vec<Row>>;

    /// Single `total` column of a count query.
    ///
    /// Драйверы, которые теряют нетипизированные колонки выражений
    /// (SQLite), переопределяют чтение через типизированную строку.
    async fn count(&self, query: &BuiltQuery) -> anyhow::Result<u64> {
        let rows = self.query(query).await?;
        rows.first()
            .and_then(|row| row_u64(row, "total"))
            .ok_or_else(|| anyhow::anyhow!("count query returned no total"))
    }
}

/// Lower-case column names (Oracle reports them upper-case)
pub fn normalize_row(value: Value) -> anyhow::Result<Row> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect()),
        other => Err(anyhow::anyhow!("expected a row object, got {}", other)),
    }
}

/// Read a non-negative integer column; numeric strings are accepted
pub fn row_u64(row: &Row, column: &str) -> Option<u64> {
    match row.get(column)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
