// src/listings/fields.rs
//! Ordered-fallback field lookup for provider payloads.
//!
//! Provider schemas drift and are documented badly, so each output field is
//! read from a list of JSON pointers tried in order. The first pointer that
//! yields a usable value wins. Adapters keep their pointer lists next to the
//! mapping code so each provider's schema assumptions stay in one place.
//!
//! This is debt, not a pattern: once a provider's schema is pinned down the
//! lists for it should shrink to one entry.

use serde_json::Value;

fn candidates<'a>(v: &'a Value, paths: &[&str]) -> Vec<&'a Value> {
    paths
        .iter()
        .filter_map(|p| v.pointer(p))
        .filter(|x| !x.is_null())
        .collect()
}

/// Strings, plus numbers rendered as strings (ids are often numeric).
pub fn str_at(v: &Value, paths: &[&str]) -> Option<String> {
    candidates(v, paths).into_iter().find_map(|x| match x {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers, or strings like "$1,250,000" / "1.5".
pub fn f64_at(v: &Value, paths: &[&str]) -> Option<f64> {
    candidates(v, paths).into_iter().find_map(|x| match x {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_loose_number(s),
        _ => None,
    })
}

pub fn i64_at(v: &Value, paths: &[&str]) -> Option<i64> {
    f64_at(v, paths).map(|n| n.round() as i64)
}

/// First non-empty array among the candidates.
pub fn array_at<'a>(v: &'a Value, paths: &[&str]) -> Option<&'a Vec<Value>> {
    candidates(v, paths)
        .into_iter()
        .find_map(|x| x.as_array().filter(|a| !a.is_empty()))
}

/// Photo URLs. Accepts arrays of strings or of objects carrying the URL
/// under one of `keys`, and falls back to a single-URL field.
pub fn photos_at(v: &Value, list_paths: &[&str], keys: &[&str], single: &[&str]) -> Vec<String> {
    if let Some(items) = array_at(v, list_paths) {
        let urls: Vec<String> = items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => keys
                    .iter()
                    .find_map(|k| item.get(*k).and_then(Value::as_str))
                    .map(str::to_string),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect();
        if !urls.is_empty() {
            return urls;
        }
    }

    str_at(v, single).into_iter().collect()
}

fn parse_loose_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
