//! Verbatim JSON rendering of definitions and payloads for debug logs.

use serde::Serialize;

/// Renders `value` as compact JSON for a log field.
///
/// Serialisation of the domain types cannot fail in practice; if it ever
/// does, the error text is logged in place of the value.
pub(crate) fn to_log_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserialisable: {e}>"))
}
