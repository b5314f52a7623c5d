//! Depth-first table discovery and row flattening.
//!
//! Walks the unwrapped payload and treats every key holding a non-empty
//! array of objects as a named table. Rows keep only scalar fields; the
//! walk continues into array elements and nested objects to find tables
//! nested inside rows. Tables are keyed by name only, so same-named
//! collections found at different depths merge by appending rows.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use serde::Serialize;

use crate::logging::structured::LogContext;

/// A flattened row: field name to scalar value, in response field order.
pub type RowRecord = Map<String, Value>;

/// A discovered named collection of flattened records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub rows: Vec<RowRecord>,
}

impl Table {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Ordered union of field names across all rows.
    pub fn columns(&self) -> IndexSet<String> {
        let mut columns = IndexSet::new();
        for row in &self.rows {
            for key in row.keys() {
                columns.insert(key.clone());
            }
        }
        columns
    }
}

/// Discover all embedded record collections in the payload.
///
/// Returns tables in discovery order. Top-level scalar fields are not a
/// table; the profile extractor collects them separately.
pub fn discover_tables(payload: &Value, ctx: &LogContext) -> IndexMap<String, Table> {
    let mut tables = IndexMap::new();
    let mut visited = HashSet::new();

    walk(payload, &mut tables, &mut visited);

    log::debug!(
        "{} DISCOVERY_COMPLETE tables={} rows={}",
        ctx,
        tables.len(),
        tables.values().map(|t| t.rows.len()).sum::<usize>()
    );

    tables
}

/// Flatten an object into a scalar-only row.
///
/// Nested arrays and objects are stripped; nulls are kept.
pub fn flatten_row(obj: &Map<String, Value>) -> RowRecord {
    obj.iter()
        .filter(|(_, value)| !value.is_array() && !value.is_object())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Recursive walk with an identity-keyed visited set.
///
/// `serde_json::Value` trees cannot be self-referential, so the guard is
/// defensive; it also caps re-walks of shared subtrees.
fn walk(value: &Value, tables: &mut IndexMap<String, Table>, visited: &mut HashSet<usize>) {
    match value {
        Value::Object(obj) => {
            if !visited.insert(value as *const Value as usize) {
                return;
            }
            for (key, child) in obj {
                match child {
                    Value::Array(elements) => {
                        if elements.first().map_or(false, Value::is_object) {
                            collect_rows(key, elements, tables);
                        }
                        for element in elements {
                            walk(element, tables, visited);
                        }
                    }
                    Value::Object(_) => walk(child, tables, visited),
                    _ => {}
                }
            }
        }
        Value::Array(elements) => {
            for element in elements {
                walk(element, tables, visited);
            }
        }
        _ => {}
    }
}

/// Append flattened rows to the named table, dropping zero-field rows.
fn collect_rows(name: &str, elements: &[Value], tables: &mut IndexMap<String, Table>) {
    for element in elements {
        if let Value::Object(obj) = element {
            let row = flatten_row(obj);
            if !row.is_empty() {
                tables
                    .entry(name.to_string())
                    .or_insert_with(|| Table::new(name))
                    .rows
                    .push(row);
            }
        }
    }
}
