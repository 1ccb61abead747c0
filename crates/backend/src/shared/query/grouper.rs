use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use super::executor::Row;
use super::view::GroupSpec;

#[derive(Debug, Error)]
pub enum GroupError {
    /// Callers check for "no matching parent" before grouping, so an empty
    /// input here means the retrieval itself went wrong
    #[error("no rows returned for grouping")]
    Empty,

    #[error("row {index} has no '{column}' column")]
    MissingKey { index: usize, column: &'static str },
}

/// Collapses flat joined rows into parent records with nested child lines
pub struct RowGrouper<'a> {
    spec: &'a GroupSpec,
}

struct Group {
    parent: Row,
    children: Vec<(Value, Value)>,
}

impl<'a> RowGrouper<'a> {
    pub fn new(spec: &'a GroupSpec) -> Self {
        Self { spec }
    }

    /// Parents come out in order of first appearance; each input row yields
    /// exactly one child, children sorted by line number ascending
    pub fn build(&self, rows: Vec<Row>) -> Result<Vec<Row>, GroupError> {
        if rows.is_empty() {
            return Err(GroupError::Empty);
        }

        let mut groups: Vec<Group> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for (index, row) in rows.iter().enumerate() {
            let key = match row.get(self.spec.parent_key) {
                Some(v) if !v.is_null() => v.to_string(),
                _ => {
                    return Err(GroupError::MissingKey {
                        index,
                        column: self.spec.parent_key,
                    })
                }
            };

            let slot = *index_by_key.entry(key).or_insert_with(|| {
                groups.push(Group {
                    parent: self.parent_of(row),
                    children: Vec::new(),
                });
                groups.len() - 1
            });

            let line = row.get(self.spec.line_column).cloned().unwrap_or(Value::Null);
            groups[slot].children.push((line, self.child_of(row)));
        }

        Ok(groups
            .into_iter()
            .map(|mut group| {
                // sort_by стабильный: строки с одинаковым номером сохраняют порядок
                group.children.sort_by(|a, b| compare_line(&a.0, &b.0));
                let lines = group.children.into_iter().map(|(_, child)| child).collect();
                group
                    .parent
                    .insert(self.spec.children_field.to_string(), Value::Array(lines));
                group.parent
            })
            .collect())
    }

    fn parent_of(&self, row: &Row) -> Row {
        self.spec
            .parent_columns
            .iter()
            .map(|c| (c.to_string(), row.get(*c).cloned().unwrap_or(Value::Null)))
            .collect()
    }

    fn child_of(&self, row: &Row) -> Value {
        let child: Row = self
            .spec
            .child_columns
            .iter()
            .map(|(source, field)| {
                (
                    field.to_string(),
                    row.get(*source).cloned().unwrap_or(Value::Null),
                )
            })
            .collect();
        Value::Object(child)
    }
}

fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numeric when both sides are numeric, text otherwise; nulls last
fn compare_line(a: &Value, b: &Value) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.to_string().cmp(&b.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SPEC: GroupSpec = GroupSpec {
        parent_key: "p",
        parent_columns: &["p", "title"],
        children_field: "lines",
        child_columns: &[("l", "line"), ("qty", "quantity")],
        line_column: "l",
    };

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_groups_by_first_seen_parent() {
        let input = rows(vec![
            json!({"p": 1, "l": 1}),
            json!({"p": 1, "l": 2}),
            json!({"p": 2, "l": 1}),
        ]);
        let grouped = RowGrouper::new(&SPEC).build(input).unwrap();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0]["p"], json!(1));
        assert_eq!(grouped[0]["lines"].as_array().unwrap().len(), 2);
        assert_eq!(grouped[1]["p"], json!(2));
        assert_eq!(grouped[1]["lines"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parent_order_is_first_appearance_not_key_order() {
        let input = rows(vec![
            json!({"p": 9, "l": 1}),
            json!({"p": 3, "l": 1}),
            json!({"p": 9, "l": 2}),
        ]);
        let grouped = RowGrouper::new(&SPEC).build(input).unwrap();
        let keys: Vec<_> = grouped.iter().map(|g| g["p"].clone()).collect();
        assert_eq!(keys, vec![json!(9), json!(3)]);
        assert_eq!(grouped[0]["lines"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_children_sorted_by_line_and_duplicates_kept() {
        let input = rows(vec![
            json!({"p": 1, "title": "A", "l": "10", "qty": 1}),
            json!({"p": 1, "title": "A", "l": 2, "qty": 5}),
            json!({"p": 1, "title": "A", "l": 2, "qty": 5}),
        ]);
        let grouped = RowGrouper::new(&SPEC).build(input).unwrap();
        let lines = grouped[0]["lines"].as_array().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], json!({"line": 2, "quantity": 5}));
        assert_eq!(lines[1], json!({"line": 2, "quantity": 5}));
        assert_eq!(lines[2], json!({"line": "10", "quantity": 1}));
        assert_eq!(grouped[0]["title"], json!("A"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            RowGrouper::new(&SPEC).build(Vec::new()),
            Err(GroupError::Empty)
        ));
    }

    #[test]
    fn test_missing_parent_key_is_an_error() {
        let input = rows(vec![json!({"p": 1, "l": 1}), json!({"l": 2})]);
        assert!(matches!(
            RowGrouper::new(&SPEC).build(input),
            Err(GroupError::MissingKey { index: 1, column: "p" })
        ));
    }
}
