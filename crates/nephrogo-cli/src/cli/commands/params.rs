//! `nephrogo params` – merge GET parameters into a URL.

use anyhow::{bail, Context, Result};
use nephrogo_core::url_params::{add_url_params, UrlParams};
use serde_json::Value;

fn split_pair<'a>(arg: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match arg.split_once('=') {
        Some((key, _)) if key.is_empty() => bail!("{flag} {arg:?}: empty key"),
        Some(pair) => Ok(pair),
        None => bail!("{flag} {arg:?}: expected KEY=VALUE"),
    }
}

/// Builds the parameter map from CLI flags, applied in order: `-p`, then
/// `--json`, then `--unset`. A key given to `-p` more than once becomes a list.
pub fn build_params(params: &[String], json: &[String], unset: &[String]) -> Result<UrlParams> {
    let mut map = UrlParams::new();

    for arg in params {
        let (key, value) = split_pair(arg, "-p")?;
        let value = Value::String(value.to_string());
        match map.get_mut(key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key.to_string(), value);
            }
        }
    }

    for arg in json {
        let (key, text) = split_pair(arg, "--json")?;
        let value: Value = serde_json::from_str(text)
            .with_context(|| format!("--json {key}: invalid JSON"))?;
        map.insert(key.to_string(), value);
    }

    for key in unset {
        map.insert(key.clone(), Value::Null);
    }

    Ok(map)
}

pub fn run_params(url: &str, params: &[String], json: &[String], unset: &[String]) -> Result<()> {
    let map = build_params(params, json, unset)?;
    let merged = add_url_params(url, &map)?;
    println!("{merged}");
    Ok(())
}
