//! Per-task serialization of approvals.

use crate::task::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Hands out one async lock per task identifier.
///
/// Approvals of the same task run one at a time; approvals of different
/// tasks do not wait for each other. Entries are dropped once no caller
/// holds or awaits them.
#[derive(Debug, Default)]
pub(super) struct ApprovalGates {
    gates: Mutex<HashMap<TaskId, Arc<AsyncMutex<()>>>>,
}

impl ApprovalGates {
    /// Waits until no other approval of `id` is in flight.
    pub(super) async fn acquire(self: &Arc<Self>, id: TaskId) -> ApprovalPermit {
        let gate = Arc::clone(self.entries().entry(id).or_default());
        let guard = gate.lock_owned().await;
        ApprovalPermit {
            gates: Arc::clone(self),
            id,
            guard: Some(guard),
        }
    }

    // The map holds no invariant a panic could break, so poisoning is ignored.
    fn entries(&self) -> MutexGuard<'_, HashMap<TaskId, Arc<AsyncMutex<()>>>> {
        self.gates.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Exclusive right to approve one task, released on drop.
pub(super) struct ApprovalPermit {
    gates: Arc<ApprovalGates>,
    id: TaskId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ApprovalPermit {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };
        let mut entries = self.gates.entries();
        // One reference in the map, one in our guard: nobody else is waiting.
        if Arc::strong_count(OwnedMutexGuard::mutex(&guard)) == 2 {
            entries.remove(&self.id);
        }
        drop(guard);
    }
}
