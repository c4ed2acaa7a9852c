//! Migration of arbitrary decoded records into canonical `CartItem`s.
//!
//! Storage may hold data written by older storefront scripts (string prices,
//! missing ids, fractional or zero quantities) and callers may hand over
//! anything at all. Every list passes through here on the way in and on the
//! way out, so the rest of the crate only ever sees canonical items.
//!
//! Coercion follows the storefront's JavaScript heritage: numeric strings and
//! booleans count as numbers, `null` counts as zero, everything else fails
//! over to the field default.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::Value;
use uuid::Uuid;

use crate::item::{CartItem, PLACEHOLDER_NAME};

/// Generate a fresh item id.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Normalize every element of `raw`, preserving order.
#[must_use]
pub fn normalize(raw: &[Value]) -> Vec<CartItem> {
    raw.iter().map(normalize_item).collect()
}

/// Normalize a single record. Non-object values become a placeholder item.
#[must_use]
pub fn normalize_item(raw: &Value) -> CartItem {
    let id = coerce_id(raw.get("id")).unwrap_or_else(new_id);
    item_with_id(raw, id)
}

/// Normalize `raw` but assign `id` regardless of what the record carries.
pub(crate) fn item_with_id(raw: &Value, id: String) -> CartItem {
    CartItem {
        id,
        name: coerce_name(raw.get("name")),
        price: coerce_price(raw.get("price")),
        quantity: coerce_quantity(raw.get("quantity")),
        size: coerce_text(raw.get("size")),
        color: coerce_text(raw.get("color")),
        image: coerce_text(raw.get("image")),
    }
}

/// Coerce a price: finite and non-negative, 0 on failure.
#[must_use]
pub fn coerce_price(raw: Option<&Value>) -> f64 {
    match raw.and_then(coerce_number) {
        Some(price) if price > 0.0 => price,
        _ => 0.0,
    }
}

/// Coerce a quantity: truncated toward zero and clamped to `1..=u32::MAX`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_quantity(raw: Option<&Value>) -> u32 {
    match raw.and_then(coerce_number) {
        Some(qty) if qty >= 1.0 => qty.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Loose numeric reading of a JSON value. `None` means "not a number".
fn coerce_number(raw: &Value) -> Option<f64> {
    let number = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                match trimmed.parse::<f64>() {
                    Ok(n) => n,
                    Err(_) => return None,
                }
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

fn coerce_id(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_name(raw: Option<&Value>) -> String {
    match raw.and_then(Value::as_str).map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => PLACEHOLDER_NAME.to_owned(),
    }
}

fn coerce_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
