//! Key-value backends holding the serialized item list.
//!
//! A backend owns exactly one text slot. The durable Primary backend and the
//! per-tab Secondary backend both implement [`Backend`]; the browser versions
//! live in `crate::web`, and [`MemoryBackend`] stands in for either of them in
//! native builds and tests.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::cell::RefCell;

/// Error returned by a [`Backend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The storage API does not exist or is disabled in this context.
    #[error("{backend} storage is unavailable")]
    Unavailable { backend: &'static str },
    /// Reading the slot threw.
    #[error("{backend} storage read failed: {detail}")]
    Read { backend: &'static str, detail: String },
    /// Writing the slot threw (quota exceeded, permissions, ...).
    #[error("{backend} storage write failed: {detail}")]
    Write { backend: &'static str, detail: String },
}

/// One text slot of persistent or semi-persistent storage.
pub trait Backend {
    /// Short label used in logs and errors.
    fn name(&self) -> &'static str;

    /// Read the slot. `Ok(None)` means the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the underlying storage is unavailable
    /// or the read throws.
    fn load(&self) -> Result<Option<String>, BackendError>;

    /// Replace the slot contents.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the underlying storage is unavailable
    /// or rejects the write.
    fn store(&self, raw: &str) -> Result<(), BackendError>;
}

/// In-process backend holding the slot in a `RefCell`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    name: &'static str,
    slot: RefCell<Option<String>>,
}

impl MemoryBackend {
    /// Create an empty backend labelled `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, slot: RefCell::new(None) }
    }

    /// Create a backend whose slot already holds `raw`.
    #[must_use]
    pub fn with_contents(name: &'static str, raw: impl Into<String>) -> Self {
        Self { name, slot: RefCell::new(Some(raw.into())) }
    }

    /// Current slot contents, bypassing the trait.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        Ok(self.slot.borrow().clone())
    }

    fn store(&self, raw: &str) -> Result<(), BackendError> {
        *self.slot.borrow_mut() = Some(raw.to_owned());
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for std::rc::Rc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        (**self).load()
    }

    fn store(&self, raw: &str) -> Result<(), BackendError> {
        (**self).store(raw)
    }
}
