//! Per-task mutual exclusion for read-check-write sequences.

use crate::task::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockEntries = HashMap<TaskId, Arc<AsyncMutex<()>>>;

/// Registry of one async lock per task identifier.
///
/// An entry lives only while some caller holds or waits for its lock.
#[derive(Debug, Default)]
pub(crate) struct TaskLocks {
    entries: Mutex<LockEntries>,
}

impl TaskLocks {
    /// Waits for exclusive access to `id`.
    pub(crate) async fn acquire(self: &Arc<Self>, id: TaskId) -> TaskLockGuard {
        let entry = {
            let mut entries = self.entries();
            Arc::clone(entries.entry(id).or_default())
        };
        let held = entry.lock_owned().await;
        TaskLockGuard {
            registry: Arc::clone(self),
            id,
            held: Some(held),
        }
    }

    fn entries(&self) -> MutexGuard<'_, LockEntries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Exclusive access to one task. Dropping the last holder of an id removes
/// its registry entry.
#[derive(Debug)]
pub(crate) struct TaskLockGuard {
    registry: Arc<TaskLocks>,
    id: TaskId,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for TaskLockGuard {
    fn drop(&mut self) {
        drop(self.held.take());
        let mut entries = self.registry.entries();
        // Waiters clone the entry under the registry lock, so a count of one
        // means only the map still refers to it.
        if entries
            .get(&self.id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            entries.remove(&self.id);
        }
    }
}
