//! Turns raw response bodies into typed pages.
//!
//! Collections are decoded one element at a time and every decode tracks the
//! path it is at, so a failure names the offending field
//! (`values[0].startDate`) rather than only a line and column.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DeserializationError;
use crate::model::{Issue, IssuePage, ValuesPage};

const ROOT: &str = "$";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    #[serde(default)]
    start_at: u64,
    #[serde(default)]
    max_results: u64,
    #[serde(default)]
    is_last: bool,
    total: Option<u64>,
}

fn parse_object(body: &str) -> Result<Map<String, Value>, DeserializationError> {
    match serde_json::from_str(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DeserializationError {
            path: ROOT.into(),
            message: format!("expected an object, found {}", kind(&other)),
        }),
        Err(e) => Err(DeserializationError::new(ROOT, &e)),
    }
}

fn take_array(doc: &mut Map<String, Value>, field: &str) -> Result<Vec<Value>, DeserializationError> {
    match doc.remove(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DeserializationError {
            path: field.into(),
            message: format!("expected an array, found {}", kind(&other)),
        }),
        None => Err(DeserializationError {
            path: field.into(),
            message: "missing field".into(),
        }),
    }
}

/// Joins a path tracked inside a value onto the location of that value.
fn join_path(prefix: &str, inner: &serde_path_to_error::Path) -> String {
    let inner = inner.to_string();
    if inner == "." {
        prefix.to_string()
    } else if prefix == ROOT {
        inner
    } else if inner.starts_with('[') {
        format!("{prefix}{inner}")
    } else {
        format!("{prefix}.{inner}")
    }
}

fn decode_at<T: DeserializeOwned>(prefix: &str, value: Value) -> Result<T, DeserializationError> {
    serde_path_to_error::deserialize(value).map_err(|e| DeserializationError {
        path: join_path(prefix, e.path()),
        message: e.inner().to_string(),
    })
}

fn decode_each<T: DeserializeOwned>(
    field: &str,
    items: Vec<Value>,
) -> Result<Vec<T>, DeserializationError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| decode_at(&format!("{field}[{i}]"), item))
        .collect()
}

fn decode_meta(doc: Map<String, Value>) -> Result<PageMeta, DeserializationError> {
    decode_at(ROOT, Value::Object(doc))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses an `issues` envelope, tagging every issue with `expanded`.
pub fn parse_issue_page(body: &str, expanded: bool) -> Result<IssuePage, DeserializationError> {
    let mut doc = parse_object(body)?;
    let raw = take_array(&mut doc, "issues")?;
    let mut issues: Vec<Issue> = decode_each("issues", raw)?;
    for issue in &mut issues {
        issue.expanded = expanded;
    }
    let meta = decode_meta(doc)?;

    Ok(IssuePage {
        start_at: meta.start_at,
        max_results: meta.max_results,
        total: meta.total.unwrap_or(issues.len() as u64),
        issues,
    })
}

/// Parses a `values` envelope together with its paging metadata.
pub fn parse_values_page<T: DeserializeOwned>(
    body: &str,
) -> Result<ValuesPage<T>, DeserializationError> {
    let mut doc = parse_object(body)?;
    let raw = take_array(&mut doc, "values")?;
    let values = decode_each("values", raw)?;
    let meta = decode_meta(doc)?;

    Ok(ValuesPage {
        start_at: meta.start_at,
        max_results: meta.max_results,
        is_last: meta.is_last,
        total: meta.total,
        values,
    })
}

/// Parses only the `values` array of an envelope.
pub fn parse_values<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, DeserializationError> {
    let mut doc = parse_object(body)?;
    let raw = take_array(&mut doc, "values")?;
    decode_each("values", raw)
}

/// Parses a body holding a single resource.
pub fn parse_one<T: DeserializeOwned>(body: &str) -> Result<T, DeserializationError> {
    let mut de = serde_json::Deserializer::from_str(body);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|e| DeserializationError {
        path: join_path(ROOT, e.path()),
        message: e.inner().to_string(),
    })?;
    de.end().map_err(|e| DeserializationError::new(ROOT, &e))?;
    Ok(value)
}
