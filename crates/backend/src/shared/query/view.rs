//! Static description of a read-only relation served by the gateway.
//!
//! Column names are written in lower case: unquoted identifiers are
//! case-insensitive in Oracle and fold to lower case in Postgres, and the
//! executor lower-cases the keys of every returned row.

/// Which backing database a view lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Erp,
    Auth,
}

/// Comparison applied by a filter column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// `col = :n`, value passed through unchanged
    Exact,
    /// `UPPER(col) LIKE UPPER(:n)` with `%value%`
    LikeCi,
    /// `UPPER(col) = UPPER(:n)`
    EqCi,
    /// `col >= :n`
    DateFrom,
    /// `col < :n` where the parameter is the day after the given date
    DateTo,
}

/// Type of the key column, used to coerce path ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Integer,
    Text,
}

#[derive(Debug)]
pub struct FilterColumn {
    /// Name of the field in the filter DTO
    pub key: &'static str,
    pub column: &'static str,
    pub mode: FilterMode,
}

/// Alternate-key lookup: `GET /api/<slug>/<field>/:value`, pattern `<slug>.<pattern>`
#[derive(Debug)]
pub struct Lookup {
    pub field: &'static str,
    pub column: &'static str,
    pub mode: FilterMode,
    pub pattern: &'static str,
}

/// Parent/children layout of a flat joined view
#[derive(Debug)]
pub struct GroupSpec {
    pub parent_key: &'static str,
    pub parent_columns: &'static [&'static str],
    /// Field of the grouped record that receives the child list
    pub children_field: &'static str,
    /// (source column, child field)
    pub child_columns: &'static [(&'static str, &'static str)],
    pub line_column: &'static str,
}

#[derive(Debug)]
pub struct ViewDef {
    /// Human name used in messages ("Branch")
    pub entity: &'static str,
    /// URL segment and message-pattern prefix ("branch")
    pub slug: &'static str,
    pub store: Store,
    /// View name or parenthesised sub-select with alias
    pub source: &'static str,
    pub columns: &'static [&'static str],
    pub key_column: &'static str,
    pub key_kind: KeyKind,
    /// Totally ordered column backing every paginated query
    pub order_key: &'static str,
    /// Declared order defines parameter numbering
    pub filters: &'static [FilterColumn],
    pub lookups: &'static [Lookup],
    pub group: Option<GroupSpec>,
    /// Read-through cache in front of list queries
    pub cached: bool,
}

impl ViewDef {
    pub fn lookup(&self, field: &str) -> Option<&Lookup> {
        self.lookups.iter().find(|l| l.field == field)
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }
}
