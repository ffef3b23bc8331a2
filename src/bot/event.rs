//! Gateway-independent reaction events.
//!
//! The coordinator consumes this type rather than serenity's `Reaction` so the
//! signup state machine can be exercised in tests without a gateway connection.

use serenity::all::{Reaction, ReactionType};

/// A single reaction added to or removed from a tracked message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// The message the reaction landed on.
    pub message_id: u64,
    /// The user who reacted.
    pub participant_id: u64,
    /// Unicode emoji as sent by the gateway.
    pub emoji: String,
}

impl ReactionEvent {
    /// Converts a gateway reaction into a signup event.
    ///
    /// # Returns
    /// - `Some(ReactionEvent)` for unicode-emoji reactions with a known user
    /// - `None` for custom emoji or reactions missing a user ID
    pub fn from_reaction(reaction: &Reaction) -> Option<Self> {
        let ReactionType::Unicode(emoji) = &reaction.emoji else {
            return None;
        };
        let user_id = reaction.user_id?;

        Some(Self {
            message_id: reaction.message_id.get(),
            participant_id: user_id.get(),
            emoji: emoji.clone(),
        })
    }
}
