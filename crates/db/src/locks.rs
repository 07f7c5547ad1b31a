//! Per-enrollment write serialization.
//!
//! All writes for one enrollment read the current ledger state, plan
//! against it, and persist the result. Two interleaved writers could both
//! plan against the same snapshot and over-allocate a month, so every
//! write path holds that enrollment's mutex across its whole
//! snapshot-plan-commit transaction. Reads take no lock; they see the
//! last committed state.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of per-enrollment write mutexes.
///
/// Writers for the same enrollment must share one registry: clones of the
/// owning repository share it through an `Arc`. The registry grows with
/// the set of enrollments written to; entries are a pointer each and are
/// never evicted.
#[derive(Debug, Default)]
pub struct EnrollmentLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl EnrollmentLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquires the write lock for one enrollment, waiting if another
    /// writer holds it.
    ///
    /// The returned guard keeps the mutex alive on its own; hold it until
    /// the write transaction has committed or rolled back.
    pub async fn acquire(&self, enrollment_id: Uuid) -> OwnedMutexGuard<()> {
        let mutex = self
            .locks
            .entry(enrollment_id)
            .or_default()
            .clone();
        mutex.lock_owned().await
    }
}
