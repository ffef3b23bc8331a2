//! Messaging collaborator boundary.
//!
//! The signup core talks to Discord exclusively through the `Messenger` trait:
//! posting/editing announcements, reverting reactions, resolving display
//! names, and direct-messaging players. `DiscordMessenger` is the production
//! implementation over Serenity's HTTP client; tests substitute a recording
//! mock.

use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, MessageId,
        ReactionType, Timestamp, UserId,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::model::session::RenderSpec;

/// Emoji players react with to sign up.
pub const SIGNUP_EMOJI: &str = "🎮";

const ANNOUNCEMENT_FOOTER: &str = "Game Scheduler";

/// Outbound messaging operations the signup core depends on.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Posts a signup announcement and returns the new message's ID.
    async fn send_announcement(
        &self,
        channel_id: u64,
        content: Option<String>,
        render: &RenderSpec,
    ) -> Result<u64, AppError>;

    /// Replaces the embed on an existing announcement.
    async fn edit_announcement(
        &self,
        channel_id: u64,
        message_id: u64,
        render: &RenderSpec,
    ) -> Result<(), AppError>;

    /// Seeds the signup reaction on a freshly posted announcement.
    async fn add_signup_reaction(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Removes a participant's signup reaction, reverting a rejected join.
    async fn remove_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        participant_id: u64,
    ) -> Result<(), AppError>;

    /// Resolves a participant ID to a display name.
    async fn resolve_display_name(&self, participant_id: u64) -> Result<String, AppError>;

    /// Sends a direct message to a participant.
    async fn send_direct(
        &self,
        participant_id: u64,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError>;
}

/// Production messenger backed by the Discord HTTP API.
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn build_embed(render: &RenderSpec) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&render.title)
            .color(render.color)
            .fields(
                render
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
            )
            .footer(CreateEmbedFooter::new(ANNOUNCEMENT_FOOTER))
            .timestamp(Timestamp::now());

        if let Some(description) = &render.description {
            embed = embed.description(description);
        }

        embed
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send_announcement(
        &self,
        channel_id: u64,
        content: Option<String>,
        render: &RenderSpec,
    ) -> Result<u64, AppError> {
        let mut message = CreateMessage::new().embed(Self::build_embed(render));
        if let Some(content) = content {
            message = message.content(content);
        }

        let posted = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(posted.id.get())
    }

    async fn edit_announcement(
        &self,
        channel_id: u64,
        message_id: u64,
        render: &RenderSpec,
    ) -> Result<(), AppError> {
        let edit = EditMessage::new().embed(Self::build_embed(render));

        ChannelId::new(channel_id)
            .edit_message(&self.http, MessageId::new(message_id), edit)
            .await?;

        Ok(())
    }

    async fn add_signup_reaction(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .create_reaction(
                &self.http,
                MessageId::new(message_id),
                ReactionType::Unicode(SIGNUP_EMOJI.to_string()),
            )
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        participant_id: u64,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_reaction(
                &self.http,
                MessageId::new(message_id),
                Some(UserId::new(participant_id)),
                ReactionType::Unicode(SIGNUP_EMOJI.to_string()),
            )
            .await?;

        Ok(())
    }

    async fn resolve_display_name(&self, participant_id: u64) -> Result<String, AppError> {
        let user = self.http.get_user(UserId::new(participant_id)).await?;
        Ok(user.global_name.unwrap_or(user.name))
    }

    async fn send_direct(
        &self,
        participant_id: u64,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title(format!("📬 {}", subject))
            .description(body)
            .color(0x5865F2)
            .footer(CreateEmbedFooter::new(ANNOUNCEMENT_FOOTER))
            .timestamp(Timestamp::now());

        let dm = UserId::new(participant_id)
            .create_dm_channel(&self.http)
            .await?;
        dm.id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }
}
