//! Primary/Secondary storage pair with read-repair.
//!
//! SYSTEM CONTEXT
//! ==============
//! Primary is the persistence-of-record and the only backend other tabs can
//! see, but it is also the backend a browser may disable (private mode, quota,
//! storage permissions). Secondary is a per-tab slot that keeps the current
//! tab correct while Primary is down.
//!
//! DESIGN
//! ======
//! Reads prefer Primary and copy whatever valid list they find into the other
//! backend, so a transient failure on either side heals on the next good
//! read. Writes go to Secondary first and then Primary; only Primary's result
//! is reported. Nothing here returns an error: backend failures are logged and
//! treated as "no data".

#[cfg(test)]
#[path = "dual_store_test.rs"]
mod dual_store_test;

use serde_json::Value;

use crate::backend::Backend;
use crate::codec;
use crate::item::CartItem;

/// The two storage backends behind the cart.
pub struct DualStore {
    primary: Box<dyn Backend>,
    secondary: Box<dyn Backend>,
}

impl DualStore {
    #[must_use]
    pub fn new(primary: impl Backend + 'static, secondary: impl Backend + 'static) -> Self {
        Self { primary: Box::new(primary), secondary: Box::new(secondary) }
    }

    /// Read the raw element list, repairing whichever backend is behind.
    ///
    /// Returns an empty list when neither backend holds a valid list.
    #[must_use]
    pub fn read(&self) -> Vec<Value> {
        if let Some((raw, items)) = load_valid(self.primary.as_ref()) {
            repair(self.secondary.as_ref(), &raw);
            return items;
        }
        if let Some((raw, items)) = load_valid(self.secondary.as_ref()) {
            repair(self.primary.as_ref(), &raw);
            return items;
        }
        Vec::new()
    }

    /// Persist `items` to both backends. Returns whether Primary accepted the write.
    pub fn write(&self, items: &[CartItem]) -> bool {
        let raw = codec::encode(items);
        if let Err(err) = self.secondary.store(&raw) {
            log::debug!("cart store: {err}");
        }
        match self.primary.store(&raw) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("cart store: {err}; keeping cart in {} only", self.secondary.name());
                false
            }
        }
    }
}

/// Load a backend and decode it, discarding anything that isn't a valid list.
fn load_valid(backend: &dyn Backend) -> Option<(String, Vec<Value>)> {
    let raw = match backend.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::debug!("cart store: {err}");
            return None;
        }
    };
    let items = codec::decode(Some(&raw))?;
    Some((raw, items))
}

fn repair(target: &dyn Backend, raw: &str) {
    match target.load() {
        Ok(Some(existing)) if existing == raw => {}
        _ => match target.store(raw) {
            Ok(()) => log::debug!("cart store: repaired {}", target.name()),
            Err(err) => log::debug!("cart store: repair skipped: {err}"),
        },
    }
}
