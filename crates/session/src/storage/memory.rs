use crate::abstract_trait::StorageAdapter;
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Process-local storage. Clones share the same slot.
#[derive(Debug)]
pub struct MemoryStorage<S> {
    slot: Arc<Mutex<Option<S>>>,
}

impl<S> Clone for MemoryStorage<S> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<S> Default for MemoryStorage<S> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<S> MemoryStorage<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: S) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(state))),
        }
    }
}

impl<S: Clone> StorageAdapter<S> for MemoryStorage<S> {
    fn load(&self) -> Option<S> {
        self.slot.lock().clone()
    }

    fn save(&self, state: &S) -> Result<()> {
        *self.slot.lock() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.lock().take();
        Ok(())
    }
}
