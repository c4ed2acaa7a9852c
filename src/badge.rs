//! Item-count badge synchronization.
//!
//! The storefront header shows the cart count in any element flagged with the
//! count-display attribute. Older templates only have a single element with a
//! fixed id, so that element is written when no flagged element exists.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use std::rc::Rc;

use crate::cart::CartStore;
use crate::item::{self, CartItem};
use crate::notifier::Subscription;

/// Where the badge text goes. The browser implementation is `web::DomBadge`.
pub trait BadgeSurface {
    /// Write `text` into every flagged count element; returns how many were written.
    fn write_flagged(&self, text: &str) -> usize;

    /// Write `text` into the legacy fallback element; returns `false` if it doesn't exist.
    fn write_legacy(&self, text: &str) -> bool;
}

/// Keeps a [`BadgeSurface`] in step with the cart.
pub struct BadgeSync<S: BadgeSurface> {
    cart: Rc<CartStore>,
    surface: S,
}

impl<S: BadgeSurface + 'static> BadgeSync<S> {
    #[must_use]
    pub fn new(cart: Rc<CartStore>, surface: S) -> Rc<Self> {
        Rc::new(Self { cart, surface })
    }

    /// Subscribe to the cart so every change refreshes the badge.
    ///
    /// The listener holds a weak reference; it goes quiet once the last
    /// `Rc<BadgeSync>` is dropped.
    pub fn attach(self: &Rc<Self>) -> Subscription {
        let badge = Rc::downgrade(self);
        self.cart.add_listener(move |event| {
            if let Some(badge) = badge.upgrade() {
                badge.refresh(Some(&event.items));
            }
        })
    }

    /// Recompute the count over `snapshot` (or the persisted list) and write it.
    pub fn refresh(&self, snapshot: Option<&[CartItem]>) {
        let count = match snapshot {
            Some(items) => item::total_count(items),
            None => self.cart.get_total_count(None),
        };
        let text = count.to_string();
        if self.surface.write_flagged(&text) == 0 && !self.surface.write_legacy(&text) {
            log::debug!("badge: no count element on this page");
        }
    }
}
