//! Visited set: the single arbiter of first discovery across concurrent workers.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::{Level, NodeId};

#[derive(Default)]
struct ClaimState {
    seen: HashSet<NodeId>,
    /// Nodes claimed since the last [`VisitedSet::take_level`]: the level being built.
    pending: Level,
}

/// Registry of every node discovered in one traversal, plus the level currently being filled.
///
/// A successful claim inserts into the registry and appends to the open level inside one
/// critical section, so a node is never registered without also being in exactly one level.
#[derive(Default)]
pub struct VisitedSet {
    state: Mutex<ClaimState>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClaimState> {
        // A worker that panicked mid-claim leaves the set consistent: insert and push are infallible.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True iff this is the first claim of `id` in this traversal. On true, `id` is already
    /// registered and appended to the open level when this returns.
    pub fn try_claim(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.seen.contains(id) {
            return false;
        }
        state.seen.insert(id.to_string());
        state.pending.push(id.to_string());
        true
    }

    /// Close the open level and return it. Call only after every worker for the level has joined.
    pub fn take_level(&self) -> Level {
        std::mem::take(&mut self.lock().pending)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
