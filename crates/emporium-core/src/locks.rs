//! # Per-User Locks
//!
//! Serializes cart and order mutations for one username while letting
//! different users proceed in parallel.
//!
//! ## Why a Lock Per User?
//! ```text
//! Without:                          With UserLocks:
//!   A: load cart [10]                 A: lock("root") ─ load ─ add ─ save ─ unlock
//!   B: load cart [10]                 B: lock("root") ······ waits ······· load [10,20] ...
//!   A: save [10,20]
//!   B: save [10,10]   ← A's add lost
//! ```
//!
//! Both engines share one registry, so a submit never snapshots a cart
//! halfway through an add.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as SlotMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

type Slots = Arc<SlotMutex<HashMap<String, Arc<Mutex<()>>>>>;

/// Registry of per-username mutexes. Cloning shares the registry.
///
/// A slot lives only while someone holds or waits for it, so lookups for
/// unknown usernames leave nothing behind.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    slots: Slots,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `username`.
    ///
    /// The lock is held until the returned guard is dropped.
    pub async fn lock(&self, username: &str) -> UserGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        UserGuard {
            held: Some(slot.lock_owned().await),
            username: username.to_string(),
            slots: self.slots.clone(),
        }
    }

    /// Number of usernames currently locked or waited on.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one username. Dropping it releases the lock.
#[derive(Debug)]
pub struct UserGuard {
    held: Option<OwnedMutexGuard<()>>,
    username: String,
    slots: Slots,
}

impl Drop for UserGuard {
    fn drop(&mut self) {
        // Registry lock first: nobody can clone the slot while we check it.
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        self.held.take();

        let idle = slots
            .get(&self.username)
            .is_some_and(|slot| Arc::strong_count(slot) == 1);
        if idle {
            slots.remove(&self.username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_is_exclusive() {
        let locks = UserLocks::new();
        let guard = locks.lock("root").await;

        let contender = locks.clone();
        let waiter = tokio::spawn(async move {
            let _guard = contender.lock("root").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = UserLocks::new();
        let _root = locks.lock("root").await;

        let other = tokio::time::timeout(Duration::from_millis(200), locks.lock("guest")).await;
        assert!(other.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_released_slots_are_evicted() {
        let locks = UserLocks::new();

        for i in 0..1_000 {
            let _guard = locks.lock(&format!("user-{i}")).await;
        }

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_slot_survives_while_someone_waits() {
        let locks = UserLocks::new();
        let guard = locks.lock("root").await;

        let contender = locks.clone();
        let waiter = tokio::spawn(async move {
            let _guard = contender.lock("root").await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
