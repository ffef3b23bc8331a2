//! Game session signup core.
//!
//! - `registry` - in-memory session registry keyed by announcement message ID
//! - `gate` - pure join/leave legality checks
//! - `presenter` - pure session-to-embed derivation
//! - `coordinator` - orchestration of reaction events and operator commands
//! - `dispatch` - paced DM fan-out to participants

pub mod coordinator;
pub mod dispatch;
pub mod gate;
pub mod presenter;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;
