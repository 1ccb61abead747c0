//! Test doubles for the database collaborator

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::builder::{BuiltQuery, Dialect};
use super::executor::{Executor, Row};

type Handler = Box<dyn Fn(&BuiltQuery) -> anyhow::Result<Vec<Row>> + Send + Sync>;

/// Executor answering from a closure; every query is recorded.
///
/// Запросы данных и количества идут параллельно, поэтому замыкание
/// должно отвечать по тексту SQL, а не по порядку вызовов.
pub struct MockExecutor {
    dialect: Dialect,
    handler: Handler,
    calls: Mutex<Vec<BuiltQuery>>,
}

impl MockExecutor {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&BuiltQuery) -> anyhow::Result<Vec<Row>> + Send + Sync + 'static,
    {
        Self {
            dialect: Dialect::Oracle,
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Executor whose every query fails with `message`
    pub fn failing(message: &'static str) -> Self {
        Self::new(move |_| Err(anyhow::anyhow!(message)))
    }

    pub fn calls(&self) -> Vec<BuiltQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn query(&self, query: &BuiltQuery) -> anyhow::Result<Vec<Row>> {
        self.calls.lock().unwrap().push(query.clone());
        (self.handler)(query)
    }
}

pub fn rows(values: Vec<Value>) -> Vec<Row> {
    values
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

/// Result of a count query, the way Oracle returns it
pub fn total(n: u64) -> Vec<Row> {
    rows(vec![serde_json::json!({ "total": n })])
}

pub fn is_count(query: &BuiltQuery) -> bool {
    query.sql.starts_with("SELECT COUNT(")
}
