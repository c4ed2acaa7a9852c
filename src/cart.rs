//! The cart: mutations over the persisted item list.
//!
//! SYSTEM CONTEXT
//! ==============
//! `CartStore` keeps no list of its own. Every operation re-reads through the
//! [`DualStore`], so each call observes the latest durable write, including
//! writes made by other tabs. Mutations follow one shape:
//! read → normalize → compute → normalize → write → broadcast.
//!
//! TRADE-OFFS
//! ==========
//! Two tabs writing at nearly the same time resolve last-writer-wins on the
//! whole list; there is no per-item merge across tabs. Storage failures never
//! reach the caller: the write lands in the Secondary backend and the change
//! is still broadcast so this tab stays consistent.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use std::rc::Rc;

use serde_json::Value;

use crate::dual_store::DualStore;
use crate::item::{self, CartItem};
use crate::normalize::{coerce_quantity, item_with_id, new_id, normalize};
use crate::notifier::{ChangeEvent, ChangeOrigin, Notifier, Subscription};

/// Stateful cart API shared by page scripts, the badge and the DOM bridge.
pub struct CartStore {
    store: DualStore,
    notifier: Rc<Notifier>,
    storage_key: String,
}

impl CartStore {
    /// Build a cart over `store`. `storage_key` is the Primary key whose
    /// cross-tab changes trigger a re-read.
    #[must_use]
    pub fn new(store: DualStore, storage_key: impl Into<String>) -> Self {
        Self { store, notifier: Notifier::new(), storage_key: storage_key.into() }
    }

    /// Register `callback` for local and cross-tab changes.
    pub fn add_listener(&self, callback: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    // --- Reads ---

    /// Current normalized list.
    #[must_use]
    pub fn get_items(&self) -> Vec<CartItem> {
        normalize(&self.store.read())
    }

    /// Sum of quantities over `items`, or over the persisted list when `None`.
    #[must_use]
    pub fn get_total_count(&self, items: Option<&[CartItem]>) -> u64 {
        match items {
            Some(items) => item::total_count(items),
            None => item::total_count(&self.get_items()),
        }
    }

    /// Sum of `price × quantity` over `items`, or over the persisted list when `None`.
    #[must_use]
    pub fn get_total_price(&self, items: Option<&[CartItem]>) -> f64 {
        match items {
            Some(items) => item::total_price(items),
            None => item::total_price(&self.get_items()),
        }
    }

    // --- Mutations ---

    /// Replace the whole list with the normalized `items`.
    pub fn set_items(&self, items: &[Value]) {
        self.write_items(normalize(items));
    }

    /// Remove every line.
    pub fn clear_cart(&self) {
        self.set_items(&[]);
    }

    /// Add a line, merging into an existing line of the same variant.
    ///
    /// `partial` may carry any subset of the item fields; its `id` is ignored.
    /// When a line with equal name, size, color, price and image exists, its
    /// quantity grows by the candidate's quantity and its id is returned.
    /// Otherwise the candidate is appended under a fresh id.
    pub fn add_item(&self, partial: &Value) -> String {
        let candidate = item_with_id(partial, new_id());
        let mut items = self.get_items();

        let id = match items.iter().position(|item| item.same_variant(&candidate)) {
            Some(index) => {
                let existing = &mut items[index];
                existing.quantity = existing.quantity.saturating_add(candidate.quantity);
                existing.id.clone()
            }
            None => {
                let id = candidate.id.clone();
                items.push(candidate);
                id
            }
        };

        self.write_items(items);
        id
    }

    /// Remove the line with `id`. Unknown ids leave storage untouched.
    pub fn remove_item(&self, id: &str) {
        let mut items = self.get_items();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            log::debug!("cart: remove of unknown item {id} ignored");
            return;
        }
        self.write_items(items);
    }

    /// Set the quantity of the line with `id` to `max(1, qty)`.
    ///
    /// Non-numeric or absent quantities count as 1. Unknown ids leave storage
    /// untouched.
    pub fn update_quantity(&self, id: &str, qty: impl Into<Value>) {
        let quantity = coerce_quantity(Some(&qty.into()));
        let mut items = self.get_items();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            log::debug!("cart: quantity update for unknown item {id} ignored");
            return;
        };
        item.quantity = quantity;
        self.write_items(items);
    }

    // --- Cross-tab ---

    /// Handle a platform storage-change signal from another tab.
    ///
    /// `key` is the changed storage key, or `None` when the whole storage area
    /// was cleared. Returns whether the cart re-read and re-broadcast.
    pub fn on_storage_change(&self, key: Option<&str>) -> bool {
        if key.is_some_and(|key| key != self.storage_key) {
            return false;
        }
        let items = self.get_items();
        self.notifier.broadcast(&ChangeEvent { items, origin: ChangeOrigin::External });
        true
    }

    fn write_items(&self, items: Vec<CartItem>) {
        if !self.store.write(&items) {
            log::debug!("cart: change kept for this tab only");
        }
        self.notifier.broadcast(&ChangeEvent { items, origin: ChangeOrigin::Local });
    }
}
