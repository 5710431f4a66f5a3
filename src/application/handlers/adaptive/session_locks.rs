//! Per-session async locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

type LockTable = HashMap<SessionId, Arc<AsyncMutex<()>>>;

fn lock_table(table: &Mutex<LockTable>) -> MutexGuard<'_, LockTable> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Serializes mutations of one adaptive session.
///
/// Different session ids never contend. Each lock is held across the whole
/// load, generate and save step. An entry lives only while someone holds or
/// waits for it, so the table stays bounded by in-flight requests.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<LockTable>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a session.
    pub async fn acquire(&self, session_id: SessionId) -> SessionGuard {
        let entry = LockEntry::register(self.locks.clone(), session_id);
        let guard = Arc::clone(&entry.lock).lock_owned().await;
        SessionGuard {
            _guard: guard,
            entry,
        }
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        lock_table(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one session until dropped.
///
/// Dropping the last guard or waiter of a session removes its table entry.
#[derive(Debug)]
pub struct SessionGuard {
    // Released before the entry so the entry sees the final count.
    _guard: OwnedMutexGuard<()>,
    entry: LockEntry,
}

impl SessionGuard {
    pub fn session_id(&self) -> SessionId {
        self.entry.session_id
    }
}

/// One holder's or waiter's claim on a table entry.
#[derive(Debug)]
struct LockEntry {
    table: Arc<Mutex<LockTable>>,
    session_id: SessionId,
    lock: Arc<AsyncMutex<()>>,
}

impl LockEntry {
    fn register(table: Arc<Mutex<LockTable>>, session_id: SessionId) -> Self {
        let lock = lock_table(&table).entry(session_id).or_default().clone();
        Self {
            table,
            session_id,
            lock,
        }
    }
}

impl Drop for LockEntry {
    fn drop(&mut self) {
        let mut table = lock_table(&self.table);
        // The table's reference plus this claim.
        let last = table
            .get(&self.session_id)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(&self.lock) == 2);
        if last {
            table.remove(&self.session_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_session_is_serialized() {
        let locks = Arc::new(SessionLocks::new());
        let id = SessionId::new();

        let guard = locks.acquire(id).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn different_sessions_do_not_contend() {
        let locks = SessionLocks::new();

        let _a = locks.acquire(SessionId::new()).await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(SessionId::new())).await;

        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn dropping_the_guard_removes_the_entry() {
        let locks = SessionLocks::new();
        let id = SessionId::new();

        let guard = locks.acquire(id).await;
        assert_eq!(guard.session_id(), id);
        assert_eq!(locks.len(), 1);
        drop(guard);

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_remains() {
        let locks = Arc::new(SessionLocks::new());
        let id = SessionId::new();

        let guard = locks.acquire(id).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn reacquire_after_release_gets_a_fresh_entry() {
        let locks = SessionLocks::new();
        let id = SessionId::new();

        drop(locks.acquire(id).await);
        let _again = locks.acquire(id).await;

        assert_eq!(locks.len(), 1);
    }
}
