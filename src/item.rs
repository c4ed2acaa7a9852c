//! Cart line items as persisted and handed to listeners.
//!
//! `CartItem` is the canonical shape: every list that leaves the normalizer is
//! made of these, and every list written to storage is made of these. Loose
//! caller input (`addItem({...})` from page scripts, legacy records) stays as
//! `serde_json::Value` until the normalizer turns it into a `CartItem`.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Display name used when an item arrives without a usable one.
pub const PLACEHOLDER_NAME: &str = "Producto";

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque identifier, stable for the item's lifetime.
    pub id: String,
    /// Display name. Never blank.
    pub name: String,
    /// Unit price. Finite and non-negative.
    pub price: f64,
    /// Number of units. Always at least 1.
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub image: String,
}

impl CartItem {
    /// Price of the whole line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Whether `other` describes the same product variant.
    ///
    /// Two lines are the same variant when name, size, color, price and image
    /// all match exactly. `id` and `quantity` are ignored.
    #[must_use]
    pub fn same_variant(&self, other: &CartItem) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.color == other.color
            && self.price.to_bits() == other.price.to_bits()
            && self.image == other.image
    }
}

/// Builder for the loose record accepted by `CartStore::add_item`.
///
/// Rust callers use this instead of hand-writing JSON. Fields left unset are
/// omitted so the normalizer applies its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
}

impl ItemDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: Some(name.into()), price: Some(price), ..Self::default() }
    }

    #[must_use]
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl From<ItemDraft> for Value {
    fn from(draft: ItemDraft) -> Self {
        let mut out = json!({});
        if let Some(fields) = out.as_object_mut() {
            if let Some(name) = draft.name {
                fields.insert("name".to_owned(), Value::from(name));
            }
            if let Some(price) = draft.price {
                fields.insert("price".to_owned(), Value::from(price));
            }
            if let Some(quantity) = draft.quantity {
                fields.insert("quantity".to_owned(), Value::from(quantity));
            }
            if let Some(size) = draft.size {
                fields.insert("size".to_owned(), Value::from(size));
            }
            if let Some(color) = draft.color {
                fields.insert("color".to_owned(), Value::from(color));
            }
            if let Some(image) = draft.image {
                fields.insert("image".to_owned(), Value::from(image));
            }
        }
        out
    }
}

/// Sum of quantities over `items`.
#[must_use]
pub fn total_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of `price × quantity` over `items`.
#[must_use]
pub fn total_price(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}
