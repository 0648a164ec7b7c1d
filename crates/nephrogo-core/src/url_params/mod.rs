//! Merging GET parameters into URLs.
//!
//! Used by link builders (pagination, filters) that need "this URL, but with
//! `page=3`". The merge runs as separate stages so each policy stays visible:
//!
//! 1. percent-decode the whole URL once, so existing escapes are not compounded
//! 2. split into scheme / authority / path / query / fragment
//! 3. parse the existing query, last occurrence of a key wins
//! 4. overlay the new parameters key by key
//! 5. drop every key whose value is null
//! 6. render booleans and records as JSON text, keep lists as lists
//! 7. form-encode, repeating the key for each list element
//! 8. reassemble with the original fragment

mod error;
mod query;
mod render;
mod split;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{Map, Value};

pub use error::UrlParamsError;

use split::SplitUrl;

/// Ordered parameter mapping. `Value::Null` removes a key.
pub type UrlParams = Map<String, Value>;

/// Adds `params` to the query string of `url`, keeping existing parameters
/// that are not overridden.
///
/// # Examples
///
/// ```
/// use nephrogo_core::url_params::add_url_params;
/// use serde_json::json;
///
/// let params = json!({"answers": false, "data": ["some", "values"]});
/// let url = add_url_params(
///     "http://example.com/test?answers=true",
///     params.as_object().unwrap(),
/// )
/// .unwrap();
/// assert_eq!(url, "http://example.com/test?answers=false&data=some&data=values");
/// ```
pub fn add_url_params(url: &str, params: &UrlParams) -> Result<String, UrlParamsError> {
    let decoded = percent_decode_str(url).decode_utf8_lossy();
    let parts = SplitUrl::parse(&decoded)?;

    let mut merged = query::parse_last_wins(parts.query);
    for (key, value) in params {
        merged.insert(key.clone(), value.clone());
    }
    merged.retain(|_, value| !value.is_null());

    let encoded = query::encode(&merged)?;
    let new_url = parts.with_query(&encoded);
    tracing::trace!(%url, %new_url, "merged url params");
    Ok(new_url)
}

/// Like [`add_url_params`], taking any value that serializes to a map.
///
/// `Option::None` fields serialize to null and therefore remove the key.
pub fn add_url_params_from<P>(url: &str, params: &P) -> Result<String, UrlParamsError>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params)? {
        Value::Object(map) => add_url_params(url, &map),
        other => Err(UrlParamsError::Encoding(format!(
            "parameters must serialize to a map, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn merge(url: &str, params: Value) -> String {
        add_url_params(url, params.as_object().unwrap()).unwrap()
    }

    #[test]
    fn overlays_and_expands_lists() {
        assert_eq!(
            merge(
                "http://example.com/test?answers=true",
                json!({"answers": false, "data": ["some", "values"]})
            ),
            "http://example.com/test?answers=false&data=some&data=values"
        );
    }

    #[test]
    fn no_query_no_params_is_identity() {
        for url in [
            "http://example.com/test",
            "https://example.com/caf%C3%A9",
            "http://example.com",
            "/doctor/",
        ] {
            assert_eq!(merge(url, json!({})), url);
        }
    }

    #[test]
    fn null_removes_existing_and_new_keys() {
        assert_eq!(
            merge(
                "http://example.com/?page=2&q=x",
                json!({"page": null, "extra": null})
            ),
            "http://example.com/?q=x"
        );
    }

    #[test]
    fn true_and_records_become_json() {
        assert_eq!(
            merge("http://example.com/", json!({"flag": true, "filter": {"a": 1}})),
            "http://example.com/?flag=true&filter=%7B%22a%22%3A+1%7D"
        );
    }

    #[test]
    fn repeated_existing_key_keeps_last_value() {
        assert_eq!(
            merge("http://example.com/?x=1&x=2", json!({})),
            "http://example.com/?x=2"
        );
    }

    #[test]
    fn fragment_survives() {
        assert_eq!(
            merge("http://example.com/doc?a=1#section", json!({"b": "2"})),
            "http://example.com/doc?a=1&b=2#section"
        );
    }

    #[test]
    fn merging_twice_is_stable() {
        let params = json!({"page": 2, "tags": ["a b", "c&d"], "opts": {"x": true}});
        let once = merge("http://example.com/search?q=kidney+diet&page=1", params.clone());
        let twice = merge(&once, params);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "http://example.com/search?q=kidney+diet&page=2&tags=a+b&tags=c%26d&opts=%7B%22x%22%3A+true%7D"
        );
    }

    #[test]
    fn encoded_input_is_not_double_encoded() {
        assert_eq!(
            merge("http://example.com/?q=100%25", json!({"page": 1})),
            "http://example.com/?q=100%25&page=1"
        );
    }

    #[test]
    fn empty_list_drops_the_key_and_question_mark() {
        assert_eq!(
            merge("http://example.com/?data=x", json!({"data": []})),
            "http://example.com/"
        );
    }

    #[test]
    fn malformed_url_is_an_error() {
        let err = add_url_params("http://[::1/x", &UrlParams::new()).unwrap_err();
        assert!(matches!(err, UrlParamsError::MalformedUrl { .. }));
    }

    #[test]
    fn from_serialize_struct() {
        #[derive(Serialize)]
        struct PageParams<'a> {
            page: u32,
            search: Option<&'a str>,
        }

        let url = add_url_params_from(
            "/doctor/nutrition/?search=old&sort=date",
            &PageParams {
                page: 3,
                search: None,
            },
        )
        .unwrap();
        assert_eq!(url, "/doctor/nutrition/?sort=date&page=3");
    }

    #[test]
    fn from_non_map_is_encoding_error() {
        let err = add_url_params_from("http://example.com/", &vec![1, 2]).unwrap_err();
        assert!(matches!(err, UrlParamsError::Encoding(_)));
    }

    #[test]
    fn from_map_with_non_string_keys_is_encoding_error() {
        let params: HashMap<Vec<u8>, u32> = HashMap::from([(vec![1], 2)]);
        let err = add_url_params_from("http://example.com/", &params).unwrap_err();
        assert!(matches!(err, UrlParamsError::Encoding(_)));
    }

    #[test]
    fn escaped_plus_in_kept_value_decodes_to_space() {
        // `%2B` is decoded to `+` before the query is parsed, which then reads as a space.
        assert_eq!(
            merge("http://example.com/?x=a%2Bb", json!({})),
            "http://example.com/?x=a+b"
        );
    }
}
