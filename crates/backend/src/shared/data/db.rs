use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, FromQueryResult, JsonValue,
    Statement,
};

use crate::shared::query::builder::{BuiltQuery, Dialect, QueryParam};
use crate::shared::query::executor::{normalize_row, Executor, Row};

/// Executor over a sea-orm connection pool (Postgres, SQLite)
pub struct SeaOrmExecutor {
    conn: DatabaseConnection,
    backend: DatabaseBackend,
    dialect: Dialect,
}

impl SeaOrmExecutor {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let dialect = Dialect::from_url(url).ok_or_else(|| {
            anyhow::anyhow!("Unsupported database URL scheme: {}", redact_url(url))
        })?;
        if dialect == Dialect::Oracle {
            anyhow::bail!(
                "{}: Oracle SQL dialect is supported by the query builder, \
                 but no Oracle driver is linked into this build",
                redact_url(url)
            );
        }

        let conn = Database::connect(url)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot connect to {}: {}", redact_url(url), e))?;
        let backend = conn.get_database_backend();
        tracing::info!("Connected to {} ({:?})", redact_url(url), dialect);

        Ok(Self {
            conn,
            backend,
            dialect,
        })
    }
}

fn to_value(param: &QueryParam) -> sea_orm::Value {
    match param {
        QueryParam::Text(s) => s.clone().into(),
        QueryParam::Integer(i) => (*i).into(),
        QueryParam::Numeric(n) => (*n).into(),
        QueryParam::Date(d) => (*d).into(),
    }
}

/// Typed count row: SQLite has no declared type for `COUNT(*)`,
/// and the JSON row reader skips such columns.
#[derive(Debug, FromQueryResult)]
struct Total {
    total: i64,
}

impl SeaOrmExecutor {
    fn statement(&self, query: &BuiltQuery) -> Statement {
        let values: Vec<sea_orm::Value> = query.params.iter().map(to_value).collect();
        tracing::debug!(sql = %query.sql, params = query.params.len(), "query");
        Statement::from_sql_and_values(self.backend, query.sql.clone(), values)
    }
}

#[async_trait]
impl Executor for SeaOrmExecutor {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn query(&self, query: &BuiltQuery) -> anyhow::Result<Vec<Row>> {
        let rows = JsonValue::find_by_statement(self.statement(query))
            .all(&self.conn)
            .await?;
        rows.into_iter().map(normalize_row).collect()
    }

    async fn count(&self, query: &BuiltQuery) -> anyhow::Result<u64> {
        let row = Total::find_by_statement(self.statement(query))
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("count query returned no rows"))?;
        u64::try_from(row.total)
            .map_err(|_| anyhow::anyhow!("count query returned {}", row.total))
    }
}

/// Hide the password part of a connection URL
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}
