use std::collections::BTreeMap;

use chrono::NaiveDate;
use contracts::shared::envelope::DEFAULT_LIMIT;
use serde::Serialize;

use super::error::QueryError;

/// Filter value after coercion of the incoming DTO
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Numeric(f64),
    Date(NaiveDate),
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Numeric(n) => write!(f, "{}", n),
            FilterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Query Specification: present filters plus raw page/limit.
///
/// Ключ присутствует только если значение задано и непустое.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    filters: BTreeMap<&'static str, FilterValue>,
    page: Option<i64>,
    limit: Option<i64>,
}

impl QuerySpec {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            filters: BTreeMap::new(),
            page,
            limit,
        }
    }

    /// Empty or whitespace-only strings mean "no constraint"
    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.filters.insert(key, FilterValue::Text(v.to_string()));
        }
        self
    }

    pub fn integer(mut self, key: &'static str, value: Option<i64>) -> Self {
        if let Some(v) = value {
            self.filters.insert(key, FilterValue::Integer(v));
        }
        self
    }

    pub fn numeric(mut self, key: &'static str, value: Option<f64>) -> Self {
        if let Some(v) = value {
            self.filters.insert(key, FilterValue::Numeric(v));
        }
        self
    }

    pub fn date(mut self, key: &'static str, value: Option<NaiveDate>) -> Self {
        if let Some(v) = value {
            self.filters.insert(key, FilterValue::Date(v));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Effective page: 1 when absent or non-positive
    pub fn page(&self) -> u64 {
        match self.page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        }
    }

    /// Effective limit: 10 when absent or non-positive
    pub fn limit(&self) -> u64 {
        match self.limit {
            Some(l) if l > 0 => l as u64,
            _ => DEFAULT_LIMIT,
        }
    }

    /// `(page - 1) * limit`, `None` when it does not fit a signed 64-bit OFFSET
    pub fn checked_offset(&self) -> Option<u64> {
        (self.page() - 1)
            .checked_mul(self.limit())
            .filter(|offset| *offset <= i64::MAX as u64)
    }

    /// Rows to skip; pages past the representable range are refused by `validate`
    pub fn offset(&self) -> u64 {
        self.checked_offset().unwrap_or(i64::MAX as u64)
    }

    pub fn validate(&self, max_limit: u64) -> Result<(), QueryError> {
        if self.limit() > max_limit {
            return Err(QueryError::Invalid(format!(
                "limit must not exceed {}, got {}",
                max_limit,
                self.limit()
            )));
        }
        if self.checked_offset().is_none() {
            return Err(QueryError::Invalid(format!(
                "page {} is out of range for limit {}",
                self.page(),
                self.limit()
            )));
        }
        if let (Some(FilterValue::Date(from)), Some(FilterValue::Date(to))) =
            (self.get("date_from"), self.get("date_to"))
        {
            if from > to {
                return Err(QueryError::Invalid(format!(
                    "date_from {} is after date_to {}",
                    from, to
                )));
            }
        }
        Ok(())
    }

    /// Short form for log lines: `name=net30 due_days=30 page=1 limit=10`
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .filters
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        parts.push(format!("page={}", self.page()));
        parts.push(format!("limit={}", self.limit()));
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_absent_and_non_positive() {
        let spec = QuerySpec::new(None, None);
        assert_eq!(spec.page(), 1);
        assert_eq!(spec.limit(), 10);

        for (page, limit) in [(Some(0), Some(0)), (Some(-3), Some(-1))] {
            let spec = QuerySpec::new(page, limit);
            assert_eq!(spec.page(), 1);
            assert_eq!(spec.limit(), 10);
            assert_eq!(spec.offset(), 0);
        }
    }

    #[test]
    fn test_offset_follows_page_and_limit() {
        for (page, limit) in [(1, 10), (2, 10), (3, 25), (7, 1)] {
            let spec = QuerySpec::new(Some(page), Some(limit));
            assert_eq!(spec.offset(), ((page - 1) * limit) as u64);
        }
    }

    #[test]
    fn test_huge_page_is_rejected_without_overflow() {
        let spec = QuerySpec::new(Some(i64::MAX), Some(10));
        assert_eq!(spec.checked_offset(), None);
        assert_eq!(spec.offset(), i64::MAX as u64);
        assert!(matches!(spec.validate(1000), Err(QueryError::Invalid(_))));

        // последняя страница, которая ещё помещается в OFFSET
        let last = QuerySpec::new(Some(i64::MAX / 10 + 1), Some(10));
        assert_eq!(last.checked_offset(), Some((i64::MAX / 10 * 10) as u64));
        assert!(last.validate(1000).is_ok());
    }

    #[test]
    fn test_empty_strings_are_skipped() {
        let spec = QuerySpec::new(None, None)
            .text("name", Some(""))
            .text("code", Some("   "))
            .text("flag", None)
            .text("kept", Some(" Y "));
        assert_eq!(spec.filter_count(), 1);
        assert_eq!(spec.get("kept"), Some(&FilterValue::Text("Y".into())));
    }

    #[test]
    fn test_validate_limit_and_dates() {
        assert!(QuerySpec::new(None, Some(1000)).validate(1000).is_ok());
        assert!(matches!(
            QuerySpec::new(None, Some(1001)).validate(1000),
            Err(QueryError::Invalid(_))
        ));

        let from = NaiveDate::from_ymd_opt(2024, 3, 10);
        let to = NaiveDate::from_ymd_opt(2024, 3, 1);
        let spec = QuerySpec::new(None, None)
            .date("date_from", from)
            .date("date_to", to);
        assert!(spec.validate(1000).is_err());
    }

    #[test]
    fn test_summary_is_stable() {
        let spec = QuerySpec::new(Some(2), None)
            .text("name", Some("net30"))
            .integer("due_days", Some(30));
        assert_eq!(spec.summary(), "due_days=30 name=net30 page=2 limit=10");
    }
}
