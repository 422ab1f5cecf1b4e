//! Owner-counted gesture lock
//!
//! Every component that needs an uninterrupted animation (a page transition,
//! a slide's first-arrival intro, a carousel step) takes a [`LockToken`].
//! Gestures are accepted only while no token is alive.

use std::sync::Arc;
use parking_lot::Mutex;

/// Who is holding the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOwner {
    /// The slide controller's own page transition
    SlideTransition,
    /// A slide's one-time entrance choreography
    Intro(&'static str),
    /// The carousel's re-entrancy guard
    CarouselStep,
}

#[derive(Debug, Default)]
struct LockTable {
    next_id: u64,
    holders: Vec<(u64, LockOwner)>,
}

/// Shared lock table; clones refer to the same table
#[derive(Debug, Clone, Default)]
pub struct LockCoordinator {
    table: Arc<Mutex<LockTable>>,
}

impl LockCoordinator {
    /// Create a free lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable gesture-driven transitions until the returned token is released
    pub fn acquire(&self, owner: LockOwner) -> LockToken {
        let mut table = self.table.lock();
        let id = table.next_id;
        table.next_id += 1;
        table.holders.push((id, owner));
        tracing::trace!("lock acquired by {:?} ({} holders)", owner, table.holders.len());

        LockToken {
            id,
            owner,
            table: Arc::clone(&self.table),
        }
    }

    /// Whether any token is alive
    pub fn is_locked(&self) -> bool {
        !self.table.lock().holders.is_empty()
    }

    /// Number of live tokens
    pub fn holder_count(&self) -> usize {
        self.table.lock().holders.len()
    }

    /// Owners of the live tokens, oldest first
    pub fn holders(&self) -> Vec<LockOwner> {
        self.table.lock().holders.iter().map(|(_, owner)| *owner).collect()
    }
}

/// A single hold on the lock. Released on [`LockToken::release`] or drop.
#[derive(Debug)]
pub struct LockToken {
    id: u64,
    owner: LockOwner,
    table: Arc<Mutex<LockTable>>,
}

impl LockToken {
    /// Owner this token was issued to
    pub fn owner(&self) -> LockOwner {
        self.owner
    }

    /// Re-enable transitions for this owner
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for LockToken {
    fn drop(&mut self) {
        let mut table = self.table.lock();
        table.holders.retain(|(id, _)| *id != self.id);
        tracing::trace!("lock released by {:?} ({} holders)", self.owner, table.holders.len());
    }
}
