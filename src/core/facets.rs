//! Facet detection over an open response payload
//!
//! The service response carries no schema. Instead of one discriminated
//! parse, each semantic category ("facet") is probed independently against a
//! declared list of field-name aliases. The alias tables are static data so
//! the priority order stays auditable in one place.

use serde_json::Value;

/// Narrative text aliases, in priority order. First non-empty wins.
pub const NARRATIVE_FIELDS: &[&str] = &["answer", "summary", "explanation"];

/// The discrete answer-list field.
pub const ANSWER_LIST_FIELD: &str = "answers";

/// Tabular dataset aliases.
pub const TABLE_FIELDS: &[&str] = &["tables", "table"];

/// Image aliases.
pub const IMAGE_FIELDS: &[&str] = &["images", "plots", "figures"];

/// Code/query aliases.
pub const CODE_FIELDS: &[&str] = &["code", "sql", "codelets"];

/// Provenance aliases. This facet routes to the provenance region.
pub const PROVENANCE_FIELDS: &[&str] = &["provenance", "materials", "sources"];

/// Walk an alias chain and return the first value that is actually usable
/// (present, not null, not an empty string).
pub fn first_meaningful<'a>(payload: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    let obj = payload.as_object()?;
    fields
        .iter()
        .filter_map(|f| obj.get(*f))
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
}

fn non_empty_text(payload: &Value, field: &str) -> Option<String> {
    let v = payload.as_object()?.get(field)?;
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The execution-error facet: the service reporting its own failure inside a
/// 2xx payload. A recovered condition, not a transport error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorFacet {
    pub error: Option<String>,
    pub details: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ErrorFacet {
    /// Detect error indicators. Present when any of error/details/stdout/
    /// stderr carries a non-empty value.
    pub fn detect(payload: &Value) -> Option<Self> {
        let facet = Self {
            error: non_empty_text(payload, "error"),
            details: non_empty_text(payload, "details"),
            stdout: non_empty_text(payload, "stdout"),
            stderr: non_empty_text(payload, "stderr"),
        };
        if facet == Self::default() {
            None
        } else {
            Some(facet)
        }
    }

    /// Assemble the multi-section message: only the sections present, in
    /// fixed order, blank-line separated, trailing whitespace trimmed.
    pub fn message(&self) -> String {
        let mut sections = Vec::new();
        if let Some(e) = &self.error {
            sections.push(format!("Error: {}", e));
        }
        if let Some(d) = &self.details {
            sections.push(format!("Traceback:\n{}", d));
        }
        if let Some(o) = &self.stdout {
            sections.push(format!("STDOUT:\n{}", o));
        }
        if let Some(e) = &self.stderr {
            sections.push(format!("STDERR:\n{}", e));
        }
        sections.join("\n\n").trim_end().to_string()
    }
}

/// Narrative text: first non-empty of answer/summary/explanation.
pub fn narrative(payload: &Value) -> Option<String> {
    NARRATIVE_FIELDS
        .iter()
        .find_map(|f| non_empty_text(payload, f))
}

/// The discrete answers array, if present.
pub fn answer_list(payload: &Value) -> Option<&Vec<Value>> {
    payload.as_object()?.get(ANSWER_LIST_FIELD)?.as_array()
}

/// Normalize the tables facet to a list of dataset entries. A bare object
/// (or any non-array value) is a singleton list.
pub fn tables(payload: &Value) -> Option<Vec<&Value>> {
    normalized_list(first_meaningful(payload, TABLE_FIELDS)?)
}

/// Normalize the images facet to a list of entries.
pub fn images(payload: &Value) -> Option<Vec<&Value>> {
    normalized_list(first_meaningful(payload, IMAGE_FIELDS)?)
}

fn normalized_list(v: &Value) -> Option<Vec<&Value>> {
    Some(match v {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    })
}

/// The code/query facet value, verbatim.
pub fn code(payload: &Value) -> Option<&Value> {
    first_meaningful(payload, CODE_FIELDS)
}

/// The provenance facet value, verbatim.
pub fn provenance(payload: &Value) -> Option<&Value> {
    first_meaningful(payload, PROVENANCE_FIELDS)
}

/// Resolve one image entry to an `src` attribute value.
///
/// Strings already carrying a `data:` or `http` prefix pass verbatim; any
/// other string is treated as a bare base64 payload; objects contribute
/// their `base64` field. Anything else resolves to nothing and the entry is
/// skipped.
pub fn image_source(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => {
            if s.starts_with("data:") || s.starts_with("http") {
                Some(s.clone())
            } else {
                Some(format!("data:image/png;base64,{}", s))
            }
        }
        Value::Object(obj) => obj
            .get("base64")
            .and_then(Value::as_str)
            .map(|b| format!("data:image/png;base64,{}", b)),
        _ => None,
    }
}
