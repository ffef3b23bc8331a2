//! Reaction event handlers driving signup joins and leaves.
//!
//! Every reaction in every channel the bot can see arrives here; the
//! coordinator ignores reactions on messages it is not tracking, so the only
//! filtering done at this layer is dropping the bot's own seeded reaction and
//! anything that is not a unicode emoji.

use std::sync::Arc;

use serenity::all::{Context, Reaction};

use crate::bot::event::ReactionEvent;
use crate::service::signup::coordinator::SignupCoordinator;

/// Handles a reaction being added to a message.
pub async fn handle_reaction_add(
    coordinator: &Arc<SignupCoordinator>,
    ctx: Context,
    reaction: Reaction,
) {
    if is_own_reaction(&ctx, &reaction) {
        return;
    }

    let Some(event) = ReactionEvent::from_reaction(&reaction) else {
        return;
    };

    coordinator.handle_reaction_add(event).await;
}

/// Handles a reaction being removed from a message.
pub async fn handle_reaction_remove(
    coordinator: &Arc<SignupCoordinator>,
    ctx: Context,
    reaction: Reaction,
) {
    if is_own_reaction(&ctx, &reaction) {
        return;
    }

    let Some(event) = ReactionEvent::from_reaction(&reaction) else {
        return;
    };

    coordinator.handle_reaction_remove(event).await;
}

/// The bot seeds 🎮 on each announcement; that reaction must not count as a
/// signup, and its removal must not count as a leave.
fn is_own_reaction(ctx: &Context, reaction: &Reaction) -> bool {
    let bot_id = ctx.cache.current_user().id;
    reaction.user_id == Some(bot_id)
}
