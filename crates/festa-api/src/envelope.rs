// Response-shape normalization
//
// The backend's response envelope is not consistent across endpoints or
// versions: the same logical list arrives as a bare array, a paginated
// `{content: [...]}` page, or either of those nested under `data` — and
// sometimes as something unrecognizable. These functions isolate that
// instability in one place so every caller can assume a uniform shape.
//
// The contract is strict: never fail. Shape trouble degrades to an empty
// list (list contexts) or `None` (record contexts).

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Extract "the list of records" from an arbitrary response body.
///
/// Priority order:
/// 1. an object exposing a `content` array (paginated page) — use it;
/// 2. a directly-array body — use it;
/// 3. an object wrapping the payload under `data` — unwrap, recurse once;
/// 4. anything else — empty list.
///
/// A candidate array whose elements do not deserialize as `T` also
/// degrades to empty rather than failing.
pub fn records<T: DeserializeOwned>(body: &Value) -> Vec<T> {
    match extract_array(body, true) {
        Some(items) => serde_json::from_value(Value::Array(items.clone())).unwrap_or_else(|e| {
            debug!(error = %e, "response records did not match the expected shape");
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// Extract "the record" from an arbitrary response body.
///
/// Applies the same unwrap ladder as [`records`] in a single-record
/// context: `data` wrapping is stripped once, and anything that does not
/// deserialize as `T` becomes `None`.
pub fn record<T: DeserializeOwned>(body: &Value) -> Option<T> {
    let candidate = match body {
        Value::Object(map) if map.contains_key("data") => map.get("data")?,
        other => other,
    };

    if candidate.is_null() {
        return None;
    }

    match serde_json::from_value(candidate.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "response record did not match the expected shape");
            None
        }
    }
}

/// The unwrap ladder shared by list contexts. `allow_recurse` bounds the
/// `data` unwrapping to a single level.
fn extract_array(body: &Value, allow_recurse: bool) -> Option<&Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("content") {
                return Some(items);
            }
            if allow_recurse {
                if let Some(inner) = map.get("data") {
                    return extract_array(inner, false);
                }
            }
            None
        }
        _ => None,
    }
}
