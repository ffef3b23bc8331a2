use std::sync::Arc;

use serenity::all::{Context, EventHandler, Reaction, Ready};
use serenity::async_trait;

use crate::service::signup::coordinator::SignupCoordinator;

pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub coordinator: Arc<SignupCoordinator>,
}

impl Handler {
    pub fn new(coordinator: Arc<SignupCoordinator>) -> Self {
        Self { coordinator }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.coordinator, ctx, reaction).await;
    }

    /// Called when a reaction is removed from a message
    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_remove(&self.coordinator, ctx, reaction).await;
    }
}
