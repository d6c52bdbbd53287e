//! Scoped access to the task store.
//!
//! A [`TaskProvider`] owns the one store for a session. Consumers hold
//! [`TaskHandle`]s, which reach the store only while the provider is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::FocuscoreError;

use super::store::TaskStore;

/// Owner of the session's task store.
#[derive(Debug)]
pub struct TaskProvider {
    store: Rc<RefCell<TaskStore>>,
}

impl TaskProvider {
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }

    /// A handle that can reach the store until [`teardown`](Self::teardown).
    #[must_use]
    pub fn handle(&self) -> TaskHandle {
        TaskHandle {
            store: Rc::downgrade(&self.store),
        }
    }

    /// Flush the store and release it. Outstanding handles stop working.
    pub fn teardown(self) {
        match self.store.try_borrow() {
            Ok(store) => store.persist(),
            Err(_) => log::warn!("task store still borrowed at teardown, skipping final flush"),
        }
        log::debug!("task provider torn down");
    }
}

/// Non-owning access to the store.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    store: Weak<RefCell<TaskStore>>,
}

impl TaskHandle {
    /// Run `f` with shared access to the store.
    ///
    /// # Errors
    ///
    /// Returns `FocuscoreError::OutsideProvider` once the provider is gone, or
    /// `FocuscoreError::StoreBusy` if the store is mutably borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&TaskStore) -> R) -> Result<R, FocuscoreError> {
        let store = self.store.upgrade().ok_or(FocuscoreError::OutsideProvider)?;
        let guard = store.try_borrow().map_err(|_| FocuscoreError::StoreBusy)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// # Errors
    ///
    /// Returns `FocuscoreError::OutsideProvider` once the provider is gone, or
    /// `FocuscoreError::StoreBusy` if the store is already borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut TaskStore) -> R) -> Result<R, FocuscoreError> {
        let store = self.store.upgrade().ok_or(FocuscoreError::OutsideProvider)?;
        let mut guard = store.try_borrow_mut().map_err(|_| FocuscoreError::StoreBusy)?;
        Ok(f(&mut guard))
    }

    /// Whether the provider is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.store.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::tasks::{NewTask, STORAGE_KEY};

    fn provider() -> (TaskProvider, MemoryStore) {
        let backend = MemoryStore::with_entry(STORAGE_KEY, "[]");
        let store = TaskStore::load(Box::new(backend.clone()));
        (TaskProvider::new(store), backend)
    }

    #[test]
    fn test_handles_share_one_store() {
        let (provider, _) = provider();
        let a = provider.handle();
        let b = a.clone();

        let id = a.with_mut(|s| s.create(NewTask::new("Shared")).id).unwrap();
        let title = b.with(|s| s.get(&id).map(|t| t.title.clone())).unwrap();
        assert_eq!(title.as_deref(), Some("Shared"));
    }

    #[test]
    fn test_handle_outside_provider_fails() {
        let (provider, backend) = provider();
        let handle = provider.handle();
        handle.with_mut(|s| s.create(NewTask::new("Flushed"))).unwrap();

        provider.teardown();

        assert!(!handle.is_attached());
        assert!(matches!(handle.with(|s| s.tasks().len()), Err(FocuscoreError::OutsideProvider)));
        let raw = backend.get(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("Flushed"));
    }

    #[test]
    fn test_reentrant_mutation_is_busy() {
        let (provider, _) = provider();
        let outer = provider.handle();
        let inner = outer.clone();

        let nested = outer.with(|_| inner.with_mut(|s| s.tasks().len())).unwrap();
        assert!(matches!(nested, Err(FocuscoreError::StoreBusy)));
    }
}
