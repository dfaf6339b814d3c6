//! Parameter resolution.
//!
//! Sources are merged in increasing precedence, later overwriting earlier:
//! endpoint query defaults, endpoint body defaults, path variables, request
//! query string, JSON body fields.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::endpoint::Endpoint;

/// Request-scoped parameter mapping.
pub type Params = HashMap<String, String>;

/// Merge every parameter source for one request.
///
/// A missing, unreadable or non-object body contributes nothing.
pub fn resolve(
    endpoint: &Endpoint,
    path_vars: &HashMap<String, String>,
    query: Option<&str>,
    body: Option<&[u8]>,
) -> Params {
    let mut params = Params::new();

    extend(&mut params, endpoint.query_defaults());
    extend(&mut params, endpoint.body_defaults());
    extend(&mut params, path_vars);

    if let Some(query) = query {
        params.extend(query_params(query));
    }

    if let Some(fields) = body.and_then(json_object) {
        for (key, value) in fields {
            params.insert(key, render_json_value(&value));
        }
    }

    params
}

fn extend(params: &mut Params, source: &HashMap<String, String>) {
    params.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Decode a query string; the first value wins when a key repeats.
fn query_params(query: &str) -> Params {
    let mut out = Params::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        out.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    out
}

/// Decode the first JSON value in `body` if it is an object.
fn json_object(body: &[u8]) -> Option<Map<String, Value>> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()?
        .ok()
        .and_then(|value| match value {
            Value::Object(fields) => Some(fields),
            _ => None,
        })
}

/// Canonical string form of a JSON field value.
///
/// Strings pass through, numbers render in plain decimal (no exponent, no
/// redundant trailing zeros), booleans as `true`/`false`, and anything else
/// as compact JSON.
pub fn render_json_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                // f64 Display is the shortest round-trip form and never uses an exponent.
                n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
            }
        }
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
