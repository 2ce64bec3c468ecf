//! Query filters and sort specifications.
//!
//! A [`Filter`] is a conjunction: an optional identifier plus any number of
//! field conditions. An empty filter matches every document.

use std::cmp::Ordering;

use serde_json::Value;
use uuid::Uuid;

use super::{Document, ID_FIELD};

/// A single predicate on a top-level document member.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Member equals the given JSON value exactly.
    Eq { field: String, value: Value },

    /// Member is a string containing `needle`, ignoring case.
    ContainsIgnoreCase { field: String, needle: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub id: Option<Uuid>,
    pub conditions: Vec<Condition>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the document with this identifier.
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            conditions: Vec::new(),
        }
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn contains_ignore_case(
        mut self,
        field: impl Into<String>,
        needle: impl Into<String>,
    ) -> Self {
        self.conditions.push(Condition::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        });
        self
    }

    /// Evaluate the filter against a stored document.
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(id) = self.id {
            let stored = document.get(ID_FIELD).and_then(Value::as_str);
            if stored != Some(id.to_string().as_str()) {
                return false;
            }
        }

        self.conditions.iter().all(|condition| match condition {
            Condition::Eq { field, value } => document.get(field) == Some(value),
            Condition::ContainsIgnoreCase { field, needle } => document
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Order results by one top-level member.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Compare two documents on the sort member.
    ///
    /// Values order the way PostgreSQL orders `jsonb`: null < string < number
    /// < boolean < array < object. A missing member sorts after every value
    /// when ascending and before every value when descending.
    ///
    /// Strings compare bytewise here, whereas PostgreSQL applies the database
    /// collation, so mixed-case text can order differently between stores.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = compare_members(a.get(&self.field), b.get(&self.field));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_members(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
