//! Query string parsing and encoding (`application/x-www-form-urlencoded`).

use serde_json::{Map, Value};
use url::form_urlencoded;

use super::error::UrlParamsError;
use super::render::{render, QueryValue};

/// Parses an existing query into key -> last seen value.
///
/// A repeated key keeps the position of its first occurrence and the value of
/// its last. Pairs with an empty value are dropped.
pub(super) fn parse_last_wins(query: &str) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        map.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    map
}

/// Encodes the merged parameters; lists expand into repeated pairs.
pub(super) fn encode(params: &Map<String, Value>) -> Result<String, UrlParamsError> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        match render(value)? {
            QueryValue::Single(text) => {
                serializer.append_pair(key, &text);
            }
            QueryValue::Repeated(items) => {
                for item in &items {
                    serializer.append_pair(key, item);
                }
            }
        }
    }
    Ok(serializer.finish())
}
