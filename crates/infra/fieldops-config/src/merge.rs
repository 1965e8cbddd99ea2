//! RFC 7396 JSON Merge Patch.
//!
//! Objects merge recursively, `null` in the patch deletes, arrays and scalars replace.

use serde_json::Value;

/// Apply an RFC 7396 merge patch to `target`.
///
/// ```
/// use serde_json::json;
/// use fieldops_config::merge::merge_patch;
///
/// let global = json!({"services": {"api": {"base_url": "https://a"}, "geocoder": {"user_agent": "x"}}});
/// let local = json!({"services": {"api": {"base_url": "https://b"}}});
/// assert_eq!(
///     merge_patch(global, local),
///     json!({"services": {"api": {"base_url": "https://b"}, "geocoder": {"user_agent": "x"}}})
/// );
/// ```
pub fn merge_patch(target: Value, patch: Value) -> Value {
    match (target, patch) {
        (Value::Object(mut target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                if patch_value.is_null() {
                    target_map.remove(&key);
                    continue;
                }
                let existing = target_map.remove(&key).unwrap_or(Value::Null);
                target_map.insert(key, merge_patch(existing, patch_value));
            }
            Value::Object(target_map)
        }
        (_, patch) => patch,
    }
}
