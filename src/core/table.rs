//! Table decoding
//!
//! The service emits tabular data in any of three encodings. Each dataset
//! entry is tried against the three structural forms in a fixed order; the
//! first match wins. Entries matching none decode to `None` and the caller
//! dumps the raw value instead.

use serde_json::Value;

/// A decoded table: ordered headers and rows of display strings.
///
/// Built once per dataset, rendered into a card, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Display form of one cell value.
///
/// A missing cell (row object without the header key) renders the literal
/// text "undefined". Strings pass through unquoted; everything else uses its
/// compact JSON form (`null`, `true`, `[1,2]`, ...).
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn row_cells(row: &Value) -> Vec<String> {
    match row {
        Value::Array(cells) => cells.iter().map(|c| cell_text(Some(c))).collect(),
        other => vec![cell_text(Some(other))],
    }
}

/// Decode one dataset entry, trying the three encodings in order:
///
/// 1. list of row objects — headers are the first object's keys in their
///    iteration order, rows are per-header lookups;
/// 2. `{ "columns": [...], "data": [...] }` — taken as given;
/// 3. list of row arrays — headers synthesized as `col_1..col_N` from the
///    first row's length.
pub fn decode(data: &Value) -> Option<Table> {
    if let Value::Array(items) = data {
        if let Some(Value::Object(first)) = items.first() {
            let headers: Vec<String> = first.keys().cloned().collect();
            let rows = items
                .iter()
                .map(|row| {
                    let obj = row.as_object();
                    headers
                        .iter()
                        .map(|h| cell_text(obj.and_then(|o| o.get(h))))
                        .collect()
                })
                .collect();
            return Some(Table { headers, rows });
        }
    }

    if let Value::Object(obj) = data {
        if let (Some(Value::Array(columns)), Some(Value::Array(data_rows))) =
            (obj.get("columns"), obj.get("data"))
        {
            let headers = columns.iter().map(|c| cell_text(Some(c))).collect();
            let rows = data_rows.iter().map(row_cells).collect();
            return Some(Table { headers, rows });
        }
    }

    if let Value::Array(items) = data {
        if let Some(Value::Array(first)) = items.first() {
            let headers = (1..=first.len()).map(|i| format!("col_{}", i)).collect();
            let rows = items.iter().map(row_cells).collect();
            return Some(Table { headers, rows });
        }
    }

    None
}
