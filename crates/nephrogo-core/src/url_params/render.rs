//! Rendering of merged parameter values into query text.
//!
//! Booleans and records become JSON text. Lists stay lists so the encoder can
//! repeat the key once per element.

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

use super::error::UrlParamsError;

/// What a single parameter contributes to the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum QueryValue {
    Single(String),
    /// One `key=value` pair per element, in order. May be empty.
    Repeated(Vec<String>),
}

/// JSON with `", "` and `": "` separators, e.g. `{"a": 1, "b": [1, 2]}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serializes `value` as JSON text with spaced separators.
pub(super) fn to_json_text(value: &Value) -> Result<String, UrlParamsError> {
    let mut buf = Vec::with_capacity(64);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|err| UrlParamsError::Encoding(err.to_string()))
}

/// Renders a merged (non-null) value.
pub(super) fn render(value: &Value) -> Result<QueryValue, UrlParamsError> {
    let rendered = match value {
        Value::String(s) => QueryValue::Single(s.clone()),
        Value::Number(n) => QueryValue::Single(n.to_string()),
        Value::Bool(_) | Value::Object(_) => QueryValue::Single(to_json_text(value)?),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(text) = render_element(item)? {
                    out.push(text);
                }
            }
            QueryValue::Repeated(out)
        }
        Value::Null => QueryValue::Repeated(Vec::new()),
    };
    Ok(rendered)
}

/// List elements: strings verbatim, nulls skipped, anything else as JSON.
fn render_element(item: &Value) -> Result<Option<String>, UrlParamsError> {
    match item {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => to_json_text(other).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booleans_are_lowercase_json() {
        assert_eq!(render(&json!(true)).unwrap(), QueryValue::Single("true".into()));
        assert_eq!(render(&json!(false)).unwrap(), QueryValue::Single("false".into()));
    }

    #[test]
    fn records_use_spaced_separators() {
        assert_eq!(
            render(&json!({"a": 1})).unwrap(),
            QueryValue::Single(r#"{"a": 1}"#.into())
        );
        assert_eq!(
            to_json_text(&json!({"b": [1, 2], "c": {"d": null}})).unwrap(),
            r#"{"b": [1, 2], "c": {"d": null}}"#
        );
    }

    #[test]
    fn numbers_and_strings_pass_through() {
        assert_eq!(render(&json!(30)).unwrap(), QueryValue::Single("30".into()));
        assert_eq!(render(&json!(2.5)).unwrap(), QueryValue::Single("2.5".into()));
        assert_eq!(
            render(&json!("kidney diet")).unwrap(),
            QueryValue::Single("kidney diet".into())
        );
    }

    #[test]
    fn lists_are_not_json_encoded() {
        assert_eq!(
            render(&json!(["some", "values"])).unwrap(),
            QueryValue::Repeated(vec!["some".into(), "values".into()])
        );
    }

    #[test]
    fn list_elements_mixed() {
        assert_eq!(
            render(&json!([1, null, true, "x", {"k": "v"}, [2, 3]])).unwrap(),
            QueryValue::Repeated(vec![
                "1".into(),
                "true".into(),
                "x".into(),
                r#"{"k": "v"}"#.into(),
                "[2, 3]".into(),
            ])
        );
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render(&json!([])).unwrap(), QueryValue::Repeated(vec![]));
    }
}
