//! Recursive structural merge of structured data.
//!
//! The update wins at every leaf it names; branches present on only one side are kept.
//! Objects merge key by key (existing keys keep their position, new keys are appended),
//! arrays merge index by index, and any other pairing is replaced by the update.

use serde_json::Value;

/// Merges `update` into `target` in place.
pub fn deep_merge(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(current), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match current.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        current.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(current), Value::Array(incoming)) => {
            for (index, value) in incoming.iter().enumerate() {
                match current.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => current.push(value.clone()),
                }
            }
        }
        (target, update) => *target = update.clone(),
    }
}
