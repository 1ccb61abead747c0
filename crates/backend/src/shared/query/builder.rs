use chrono::NaiveDate;

use super::error::QueryError;
use super::spec::{FilterValue, QuerySpec};
use super::view::{FilterColumn, FilterMode, ViewDef};

/// Bound parameter
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Integer(i64),
    Numeric(f64),
    Date(NaiveDate),
}

impl From<&FilterValue> for QueryParam {
    fn from(v: &FilterValue) -> Self {
        match v {
            FilterValue::Text(s) => QueryParam::Text(s.clone()),
            FilterValue::Integer(i) => QueryParam::Integer(*i),
            FilterValue::Numeric(n) => QueryParam::Numeric(*n),
            FilterValue::Date(d) => QueryParam::Date(*d),
        }
    }
}

/// SQL flavour: placeholder syntax and pagination suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `:1`, `OFFSET :n ROWS FETCH NEXT :m ROWS ONLY`
    Oracle,
    /// `$1`, same OFFSET/FETCH suffix
    Postgres,
    /// `?1`, `LIMIT ?m OFFSET ?n`
    Sqlite,
}

impl Dialect {
    /// Dialect by connection URL scheme (`sqlite::memory:` has no `//`)
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once(':')?;
        let scheme = scheme.to_ascii_lowercase();
        match scheme.as_str() {
            "oracle" => Some(Dialect::Oracle),
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    fn placeholder(self, n: usize) -> String {
        match self {
            Dialect::Oracle => format!(":{}", n),
            Dialect::Postgres => format!("${}", n),
            Dialect::Sqlite => format!("?{}", n),
        }
    }

    fn page_suffix(self, offset_ph: &str, limit_ph: &str) -> String {
        match self {
            Dialect::Oracle | Dialect::Postgres => {
                format!(" OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", offset_ph, limit_ph)
            }
            Dialect::Sqlite => format!(" LIMIT {} OFFSET {}", limit_ph, offset_ph),
        }
    }
}

/// Result of query building
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Parameter list that numbers placeholders as they are pushed
struct Params {
    dialect: Dialect,
    values: Vec<QueryParam>,
}

impl Params {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            values: Vec::new(),
        }
    }

    fn push(&mut self, value: QueryParam) -> String {
        self.values.push(value);
        self.dialect.placeholder(self.values.len())
    }
}

/// Dynamic SQL builder over a [`ViewDef`]
pub struct SqlBuilder<'a> {
    view: &'a ViewDef,
    dialect: Dialect,
}

impl<'a> SqlBuilder<'a> {
    pub fn new(view: &'a ViewDef, dialect: Dialect) -> Self {
        Self { view, dialect }
    }

    /// Page of rows: filters, then `ORDER BY <key>` with `(offset, limit)` as the last two params
    pub fn build_page(&self, spec: &QuerySpec) -> Result<BuiltQuery, QueryError> {
        let mut params = Params::new(self.dialect);
        let where_clause = self.build_where_clause(spec, &mut params)?;
        let offset_ph = params.push(QueryParam::Integer(spec.offset() as i64));
        let limit_ph = params.push(QueryParam::Integer(spec.limit() as i64));

        let sql = format!(
            "SELECT {} FROM {} {} ORDER BY {}{}",
            self.view.columns.join(", "),
            self.view.source,
            where_clause,
            self.view.order_key,
            self.dialect.page_suffix(&offset_ph, &limit_ph)
        );
        Ok(BuiltQuery {
            sql,
            params: params.values,
        })
    }

    /// Same predicate as the page query, single aggregate column, no pagination.
    /// Grouped views count distinct parents.
    pub fn build_count(&self, spec: &QuerySpec) -> Result<BuiltQuery, QueryError> {
        let mut params = Params::new(self.dialect);
        let where_clause = self.build_where_clause(spec, &mut params)?;
        let aggregate = match &self.view.group {
            Some(group) => format!("COUNT(DISTINCT {})", group.parent_key),
            None => "COUNT(*)".to_string(),
        };
        let sql = format!(
            "SELECT {} AS total FROM {} {}",
            aggregate, self.view.source, where_clause
        );
        Ok(BuiltQuery {
            sql,
            params: params.values,
        })
    }

    /// Page of distinct parent keys of a grouped view
    pub fn build_key_page(&self, spec: &QuerySpec) -> Result<BuiltQuery, QueryError> {
        let key = self.parent_key();
        let mut params = Params::new(self.dialect);
        let where_clause = self.build_where_clause(spec, &mut params)?;
        let offset_ph = params.push(QueryParam::Integer(spec.offset() as i64));
        let limit_ph = params.push(QueryParam::Integer(spec.limit() as i64));

        let sql = format!(
            "SELECT DISTINCT {key} FROM {} {} ORDER BY {key}{}",
            self.view.source,
            where_clause,
            self.dialect.page_suffix(&offset_ph, &limit_ph)
        );
        Ok(BuiltQuery {
            sql,
            params: params.values,
        })
    }

    /// Lines of the given parents, same predicate, ordered by parent then line number
    pub fn build_lines(
        &self,
        spec: &QuerySpec,
        keys: &[QueryParam],
    ) -> Result<BuiltQuery, QueryError> {
        if keys.is_empty() {
            return Err(QueryError::EmptyKeySet);
        }
        let mut params = Params::new(self.dialect);
        let where_clause = self.build_where_clause(spec, &mut params)?;
        let placeholders: Vec<String> = keys.iter().map(|k| params.push(k.clone())).collect();

        let sql = format!(
            "SELECT {} FROM {} {} AND {} IN ({}){}",
            self.view.columns.join(", "),
            self.view.source,
            where_clause,
            self.parent_key(),
            placeholders.join(", "),
            self.order_by()
        );
        Ok(BuiltQuery {
            sql,
            params: params.values,
        })
    }

    /// Rows matching one column: primary key or an alternate key
    pub fn build_by_column(&self, column: &str, mode: FilterMode, value: QueryParam) -> BuiltQuery {
        let mut params = Params::new(self.dialect);
        let ph = params.push(value);
        let condition = match mode {
            FilterMode::EqCi => format!("UPPER({}) = UPPER({})", column, ph),
            _ => format!("{} = {}", column, ph),
        };
        let sql = format!(
            "SELECT {} FROM {} WHERE {}{}",
            self.view.columns.join(", "),
            self.view.source,
            condition,
            self.order_by()
        );
        BuiltQuery {
            sql,
            params: params.values,
        }
    }

    /// `WHERE 1=1` followed by one `AND` per present filter, in declared order
    fn build_where_clause(
        &self,
        spec: &QuerySpec,
        params: &mut Params,
    ) -> Result<String, QueryError> {
        let mut sql = String::from("WHERE 1=1");
        for filter in self.view.filters {
            let Some(value) = spec.get(filter.key) else {
                continue;
            };
            let condition = condition_to_sql(filter, value, params)?;
            sql.push_str(" AND ");
            sql.push_str(&condition);
        }
        Ok(sql)
    }

    fn parent_key(&self) -> &'static str {
        self.view
            .group
            .as_ref()
            .map(|g| g.parent_key)
            .unwrap_or(self.view.key_column)
    }

    fn order_by(&self) -> String {
        match &self.view.group {
            Some(group) => format!(" ORDER BY {}, {}", group.parent_key, group.line_column),
            None => format!(" ORDER BY {}", self.view.order_key),
        }
    }
}

/// Build SQL fragment for one filter column
fn condition_to_sql(
    filter: &FilterColumn,
    value: &FilterValue,
    params: &mut Params,
) -> Result<String, QueryError> {
    let column = filter.column;
    match (filter.mode, value) {
        (FilterMode::Exact, v) => {
            let ph = params.push(v.into());
            Ok(format!("{} = {}", column, ph))
        }
        (FilterMode::LikeCi, FilterValue::Text(s)) => {
            let ph = params.push(QueryParam::Text(format!("%{}%", s)));
            Ok(format!("UPPER({}) LIKE UPPER({})", column, ph))
        }
        (FilterMode::EqCi, FilterValue::Text(s)) => {
            let ph = params.push(QueryParam::Text(s.clone()));
            Ok(format!("UPPER({}) = UPPER({})", column, ph))
        }
        (FilterMode::DateFrom, FilterValue::Date(d)) => {
            let ph = params.push(QueryParam::Date(*d));
            Ok(format!("{} >= {}", column, ph))
        }
        (FilterMode::DateTo, FilterValue::Date(d)) => {
            // Конец дня включительно: DATE в ERP хранит и время
            let next_day = d.succ_opt().unwrap_or(*d);
            let ph = params.push(QueryParam::Date(next_day));
            Ok(format!("{} < {}", column, ph))
        }
        (FilterMode::LikeCi | FilterMode::EqCi, _) => Err(QueryError::TypeMismatch {
            key: filter.key,
            expected: "text",
        }),
        (FilterMode::DateFrom | FilterMode::DateTo, _) => Err(QueryError::TypeMismatch {
            key: filter.key,
            expected: "date",
        }),
    }
}
