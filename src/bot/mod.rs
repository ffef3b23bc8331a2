//! Discord bot integration for reaction-driven signups.
//!
//! The bot watches the configured signup channel for 🎮 reactions on its own
//! announcement messages and forwards them to the signup coordinator. It runs
//! in a separate tokio task so it never blocks the HTTP server, and its HTTP
//! client is shared with the messenger so announcements and DMs go out over
//! the same connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability events
//! - `GUILD_MESSAGES` - Message events in the signup channel
//! - `GUILD_MESSAGE_REACTIONS` - Reaction add/remove events driving signups
//! - `DIRECT_MESSAGES` - Allows players to receive game notification DMs

pub mod event;
pub mod handler;
pub mod start;
