//! Text codec for the persisted item list.
//!
//! Both backends hold the same JSON array text. The Secondary slot is shared
//! with whatever else a page stores in `window.name`, so its payload is framed
//! with a fixed prefix and anything without that prefix reads as "no data".

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde_json::Value;

use crate::item::CartItem;

/// Parse a persisted blob into its raw element list.
///
/// Returns `None` when the blob is absent, blank, malformed, or anything other
/// than a JSON array.
#[must_use]
pub fn decode(raw: Option<&str>) -> Option<Vec<Value>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => None,
        Err(err) => {
            log::debug!("cart codec: discarding malformed blob: {err}");
            None
        }
    }
}

/// Serialize a canonical item list as a JSON array.
#[must_use]
pub fn encode(items: &[CartItem]) -> String {
    // CartItem has only string and number fields; serialization cannot fail.
    serde_json::to_string(items).unwrap_or_else(|err| {
        log::error!("cart codec: failed to encode items: {err}");
        String::from("[]")
    })
}

/// Frame `payload` for storage in the Secondary slot.
#[must_use]
pub fn wrap_slot(prefix: &str, payload: &str) -> String {
    format!("{prefix}{payload}")
}

/// Extract the payload from a Secondary slot value, if it carries `prefix`.
#[must_use]
pub fn unwrap_slot<'a>(prefix: &str, slot: &'a str) -> Option<&'a str> {
    slot.strip_prefix(prefix)
}
