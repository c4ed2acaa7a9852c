//! Native test doubles for browser storage.

use std::cell::Cell;
use std::rc::Rc;

use crate::backend::{Backend, BackendError, MemoryBackend};

/// Backend that behaves like disabled storage: every call fails.
pub struct FailingBackend;

impl Backend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        Err(BackendError::Read { backend: "failing", detail: "SecurityError".to_owned() })
    }

    fn store(&self, _raw: &str) -> Result<(), BackendError> {
        Err(BackendError::Write { backend: "failing", detail: "QuotaExceededError".to_owned() })
    }
}

/// Memory backend that counts loads and stores.
#[derive(Default)]
pub struct CountingBackend {
    pub inner: MemoryBackend,
    pub loads: Cell<usize>,
    pub stores: Cell<usize>,
}

impl CountingBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self { inner: MemoryBackend::new("counting"), ..Self::default() })
    }
}

impl Backend for CountingBackend {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load()
    }

    fn store(&self, raw: &str) -> Result<(), BackendError> {
        self.stores.set(self.stores.get() + 1);
        self.inner.store(raw)
    }
}

/// A Primary/Secondary pair of shared memory backends.
pub fn memory_pair() -> (Rc<MemoryBackend>, Rc<MemoryBackend>) {
    (Rc::new(MemoryBackend::new("primary")), Rc::new(MemoryBackend::new("secondary")))
}
