//! Capacity gate for join/leave requests.
//!
//! Pure decision functions with no state of their own. The coordinator runs
//! these inside the registry's `mutate` closure so the check and the mutation
//! happen atomically under one lock.

use crate::model::session::{GameSession, SessionStatus};

/// Outcome of a join legality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    /// Join is legal. Also returned when the participant is already on the
    /// roster; re-adding is harmless and does not grow the set.
    Allowed,
    /// The session is no longer accepting signups (started or ended).
    NotScheduled,
    /// The player cap is reached.
    Full,
}

/// Outcome of a leave legality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    /// Leave is legal regardless of current membership; removing a non-member
    /// is a no-op.
    Allowed,
    /// The session is no longer scheduled. Leaving a running session is
    /// ignored rather than rejected so the displayed roster stays intact.
    Ignored,
}

/// Decides whether a participant may join the session.
///
/// Capacity is enforced only at the moment of attempted join: a full session
/// rejects further joins, it never truncates the existing roster. Existing
/// members pass the capacity check so that a re-join stays idempotent.
pub fn can_join(session: &GameSession, participant_id: u64) -> JoinDecision {
    if session.status != SessionStatus::Scheduled {
        return JoinDecision::NotScheduled;
    }

    if session.is_full() && !session.participants.contains(&participant_id) {
        return JoinDecision::Full;
    }

    JoinDecision::Allowed
}

/// Decides whether a participant may leave (cancel their signup).
pub fn can_leave(session: &GameSession, _participant_id: u64) -> LeaveDecision {
    if session.status != SessionStatus::Scheduled {
        return LeaveDecision::Ignored;
    }

    LeaveDecision::Allowed
}
