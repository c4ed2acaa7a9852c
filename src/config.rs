//! Cart configuration: storage key, slot framing and DOM hooks.
//!
//! Pages normally run with the defaults. A page that needs different names
//! (two storefronts on one origin, a renamed badge) passes a partial object to
//! `new CartManager({...})`; missing fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "cartItems";
pub const DEFAULT_SLOT_PREFIX: &str = "cartItems::";
pub const DEFAULT_CHANGE_EVENT: &str = "cart:change";
pub const DEFAULT_COUNT_ATTRIBUTE: &str = "data-cart-count";
pub const DEFAULT_LEGACY_BADGE_ID: &str = "cart-count";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartConfig {
    /// Primary storage key; also the key watched for cross-tab changes.
    pub storage_key: String,
    /// Literal prefix framing the Secondary payload in `window.name`.
    pub slot_prefix: String,
    /// Name of the window-level change event.
    pub change_event: String,
    /// Attribute flagging count-display elements.
    pub count_attribute: String,
    /// Id of the legacy single badge element.
    pub legacy_badge_id: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            slot_prefix: DEFAULT_SLOT_PREFIX.to_owned(),
            change_event: DEFAULT_CHANGE_EVENT.to_owned(),
            count_attribute: DEFAULT_COUNT_ATTRIBUTE.to_owned(),
            legacy_badge_id: DEFAULT_LEGACY_BADGE_ID.to_owned(),
        }
    }
}

impl CartConfig {
    /// Parse a JSON config object, falling back to defaults for anything
    /// missing, blank or malformed.
    #[must_use]
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(raw) {
            Ok(config) => config.with_blank_fields_defaulted(),
            Err(err) => {
                log::warn!("cart config: ignoring invalid config: {err}");
                Self::default()
            }
        }
    }

    /// CSS selector matching every count-display element.
    #[must_use]
    pub fn count_selector(&self) -> String {
        format!("[{}]", self.count_attribute)
    }

    fn with_blank_fields_defaulted(self) -> Self {
        let defaults = Self::default();
        Self {
            storage_key: non_blank(self.storage_key, defaults.storage_key),
            slot_prefix: non_blank(self.slot_prefix, defaults.slot_prefix),
            change_event: non_blank(self.change_event, defaults.change_event),
            count_attribute: non_blank(self.count_attribute, defaults.count_attribute),
            legacy_badge_id: non_blank(self.legacy_badge_id, defaults.legacy_badge_id),
        }
    }
}

fn non_blank(value: String, fallback: String) -> String {
    if value.trim().is_empty() { fallback } else { value }
}
