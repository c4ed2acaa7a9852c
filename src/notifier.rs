//! Change notification for cart observers.
//!
//! `Notifier` is an explicit observer list. Every cart write produces one
//! [`ChangeEvent`] carrying the freshly normalized list; the badge, the DOM
//! event bridge and page scripts all subscribe here.
//!
//! Dispatch semantics mirror DOM `EventTarget`: the listener set is captured
//! when dispatch starts, so a listener added from inside a callback misses the
//! in-flight event, and a listener removed before its turn is skipped. There is
//! no replay for late subscribers.

#[cfg(test)]
#[path = "notifier_test.rs"]
mod notifier_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::item::CartItem;

/// Where a change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A mutation made in this page.
    Local,
    /// Another tab wrote the Primary backend; the list was re-read.
    External,
}

/// Payload delivered to every listener.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub items: Vec<CartItem>,
    pub origin: ChangeOrigin,
}

type Listener = Rc<dyn Fn(&ChangeEvent)>;

/// Observer list owned by a cart.
#[derive(Default)]
pub struct Notifier {
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register `callback` for every subsequent event, local or cross-tab.
    pub fn subscribe(self: &Rc<Self>, callback: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(callback)));
        Subscription { notifier: Rc::downgrade(self), id: Some(id) }
    }

    /// Deliver `event` to the listeners registered right now.
    pub fn broadcast(&self, event: &ChangeEvent) {
        let snapshot: Vec<(u64, Listener)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener(event);
            }
        }
    }

    fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(other, _)| *other == id)
    }

    fn remove(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(other, _)| *other != id);
    }
}

/// Disposer returned by [`Notifier::subscribe`].
///
/// Dropping a `Subscription` leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    notifier: Weak<Notifier>,
    id: Option<u64>,
}

impl Subscription {
    /// A disposer that removes nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self { notifier: Weak::new(), id: None }
    }

    /// Remove the listener. Safe to call after the notifier is gone or more
    /// than once through clones.
    pub fn unsubscribe(self) {
        if let (Some(notifier), Some(id)) = (self.notifier.upgrade(), self.id) {
            notifier.remove(id);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("listeners", &self.len()).finish()
    }
}
