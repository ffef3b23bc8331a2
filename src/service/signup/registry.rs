//! In-memory registry of game session signups.
//!
//! Owns the map from announcement message ID to `GameSession`. The map is the
//! only shared mutable resource in the signup core; callers never touch it
//! directly — `mutate` is the single sanctioned mutation path and runs its
//! closure under the registry's write lock, so guard checks and the resulting
//! mutation are atomic with respect to concurrent callers.
//!
//! All state is process-lifetime; a restart loses every tracked signup.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;

use crate::error::signup::SignupError;
use crate::model::session::{CreateSessionParams, GameSession, SessionStatus};

/// A registry entry pairing the session record with its pending eviction
/// timer, if one has been scheduled.
struct SessionEntry {
    session: GameSession,
    eviction: Option<AbortHandle>,
}

struct RegistryInner {
    sessions: HashMap<u64, SessionEntry>,
    /// Message IDs in creation order, for stable listings.
    order: Vec<u64>,
}

/// Registry of tracked game session signups.
///
/// Cheap to clone; clones share the same underlying map. Constructed once at
/// startup and injected into the coordinator and HTTP handlers rather than
/// living as ambient global state, so tests get a fresh registry each.
#[derive(Clone)]
pub struct SignupRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl SignupRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                sessions: HashMap::new(),
                order: Vec::new(),
            })),
        }
    }

    /// Tracks a new session under the given announcement message ID.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - Snapshot of the newly tracked session
    /// - `Err(SignupError::DuplicateId)` - A session is already tracked for this message
    pub async fn create(
        &self,
        message_id: u64,
        params: CreateSessionParams,
    ) -> Result<GameSession, SignupError> {
        let mut inner = self.inner.write().await;

        if inner.sessions.contains_key(&message_id) {
            return Err(SignupError::DuplicateId(message_id));
        }

        let session = GameSession::new(message_id, params);
        inner.sessions.insert(
            message_id,
            SessionEntry {
                session: session.clone(),
                eviction: None,
            },
        );
        inner.order.push(message_id);

        Ok(session)
    }

    /// Returns a snapshot of the session tracked for the given message, if any.
    pub async fn get(&self, message_id: u64) -> Option<GameSession> {
        self.inner
            .read()
            .await
            .sessions
            .get(&message_id)
            .map(|entry| entry.session.clone())
    }

    /// Returns snapshots of all tracked sessions in creation order.
    pub async fn list(&self) -> Vec<GameSession> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.sessions.get(id))
            .map(|entry| entry.session.clone())
            .collect()
    }

    /// Returns snapshots of tracked sessions with the given status, in
    /// creation order.
    pub async fn list_by_status(&self, status: SessionStatus) -> Vec<GameSession> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.sessions.get(id))
            .filter(|entry| entry.session.status == status)
            .map(|entry| entry.session.clone())
            .collect()
    }

    /// Stops tracking the session for the given message.
    ///
    /// Idempotent: removing an absent ID is not an error. Any pending eviction
    /// timer for the entry is aborted so it cannot fire against a reused ID.
    pub async fn remove(&self, message_id: u64) {
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.sessions.remove(&message_id) {
            inner.order.retain(|id| *id != message_id);
            if let Some(eviction) = entry.eviction {
                eviction.abort();
            }
        }
    }

    /// Applies a mutation to the tracked session under the registry's write
    /// lock.
    ///
    /// This is the only sanctioned way to change a session's participants or
    /// status. The closure's decision (e.g. a gate check) and the mutation it
    /// performs are atomic with respect to every other caller.
    ///
    /// # Returns
    /// - `Ok(T)` - Whatever the closure returned
    /// - `Err(SignupError::NotFound)` - No session is tracked for this message
    pub async fn mutate<T, F>(&self, message_id: u64, f: F) -> Result<T, SignupError>
    where
        F: FnOnce(&mut GameSession) -> T,
    {
        let mut inner = self.inner.write().await;

        let entry = inner
            .sessions
            .get_mut(&message_id)
            .ok_or(SignupError::NotFound(message_id))?;

        Ok(f(&mut entry.session))
    }

    /// Associates a pending eviction timer with the entry so `remove` can
    /// cancel it. Replacing a previous handle aborts it first.
    pub async fn set_eviction(&self, message_id: u64, handle: AbortHandle) {
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.sessions.get_mut(&message_id) {
            if let Some(previous) = entry.eviction.replace(handle) {
                previous.abort();
            }
        } else {
            // Entry was removed between spawn and registration; the timer
            // would fire against a missing ID, which remove() treats as a
            // no-op, but there is no reason to let it linger.
            handle.abort();
        }
    }
}

impl Default for SignupRegistry {
    fn default() -> Self {
        Self::new()
    }
}
