//! JSON merges used by buffer mounting and reconciliation.

use serde_json::{Map, Value};

/// Defaults first, stored values override. Objects merge recursively,
/// everything else (arrays included) is taken whole from `stored`.
pub fn merge_defaults(defaults: Value, stored: Value) -> Value {
    match (defaults, stored) {
        (Value::Object(mut base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let merged = match base.remove(&key) {
                    Some(default) => merge_defaults(default, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, stored) => stored,
    }
}

/// Three-way merge at leaf granularity: a leaf changed in `incoming`
/// relative to `baseline` wins, otherwise the `local` leaf is kept.
pub fn merge_fields(baseline: &Value, local: &Value, incoming: &Value) -> Value {
    match (baseline, local, incoming) {
        (Value::Object(base), Value::Object(mine), Value::Object(theirs)) => {
            let mut out = Map::with_capacity(mine.len().max(theirs.len()));
            for (key, their_value) in theirs {
                let merged = match (base.get(key), mine.get(key)) {
                    (Some(b), Some(m)) => merge_fields(b, m, their_value),
                    (None, Some(m)) => m.clone(),
                    // Removed locally and untouched by the store: stays removed.
                    (Some(b), None) if b == their_value => continue,
                    (_, None) => their_value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            for (key, my_value) in mine {
                if !theirs.contains_key(key) && !base.contains_key(key) {
                    out.insert(key.clone(), my_value.clone());
                }
            }
            Value::Object(out)
        }
        _ => {
            if incoming != baseline {
                incoming.clone()
            } else {
                local.clone()
            }
        }
    }
}
