//! Direct-message fan-out to session participants.
//!
//! Sends are sequential by design, paced with a fixed inter-send delay to stay
//! under Discord's DM rate limits. Each send is attempted independently; one
//! recipient with DMs disabled never aborts the batch. A batch, once started,
//! runs to completion.

use std::sync::Arc;
use std::time::Duration;

use crate::error::signup::SignupError;
use crate::model::session::GameSession;
use crate::service::discord::messenger::Messenger;

const UNKNOWN_USER: &str = "Unknown User";

/// Per-recipient outcome of a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchDetail {
    pub participant_id: u64,
    pub display_name: String,
    pub delivered: bool,
    pub error: Option<String>,
}

/// Aggregated result of a fan-out batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent_count: usize,
    pub failed_count: usize,
    pub details: Vec<DispatchDetail>,
}

impl DispatchReport {
    /// Whether at least one recipient received the message. A batch where
    /// every send failed completes without raising, but is not a success.
    pub fn success(&self) -> bool {
        self.sent_count > 0
    }
}

/// Fans a direct message out to every participant of a session.
pub struct NotificationDispatcher {
    messenger: Arc<dyn Messenger>,
    /// Fixed delay between consecutive sends.
    pace: Duration,
}

impl NotificationDispatcher {
    pub fn new(messenger: Arc<dyn Messenger>, pace: Duration) -> Self {
        Self { messenger, pace }
    }

    /// Delivers `subject`/`body` to each participant in roster order.
    ///
    /// Resolves each recipient's display name for the report, substituting a
    /// placeholder when resolution fails. Per-recipient delivery failures are
    /// recorded in the detail list and never raised to the caller.
    ///
    /// # Returns
    /// - `Ok(DispatchReport)` - Batch completed; counts and per-recipient detail
    /// - `Err(SignupError::NoParticipants)` - Roster was empty, no send attempted
    pub async fn dispatch(
        &self,
        session: &GameSession,
        subject: &str,
        body: &str,
    ) -> Result<DispatchReport, SignupError> {
        if session.participants.is_empty() {
            return Err(SignupError::NoParticipants);
        }

        let mut details = Vec::with_capacity(session.player_count());

        for (index, participant_id) in session.participants.iter().copied().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pace).await;
            }

            let display_name = match self.messenger.resolve_display_name(participant_id).await {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!("Failed to resolve user {}: {}", participant_id, err);
                    UNKNOWN_USER.to_string()
                }
            };

            match self
                .messenger
                .send_direct(participant_id, subject, body)
                .await
            {
                Ok(()) => {
                    tracing::debug!("Sent game DM to {} ({})", display_name, participant_id);
                    details.push(DispatchDetail {
                        participant_id,
                        display_name,
                        delivered: true,
                        error: None,
                    });
                }
                Err(err) => {
                    // DMs disabled, blocked bot, etc. Keep going.
                    tracing::warn!(
                        "Failed to DM {} ({}) for game \"{}\": {}",
                        display_name,
                        participant_id,
                        session.name,
                        err
                    );
                    details.push(DispatchDetail {
                        participant_id,
                        display_name,
                        delivered: false,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        let sent_count = details.iter().filter(|d| d.delivered).count();
        let report = DispatchReport {
            sent_count,
            failed_count: details.len() - sent_count,
            details,
        };

        tracing::info!(
            "Game DM fan-out for \"{}\": {} sent, {} failed",
            session.name,
            report.sent_count,
            report.failed_count
        );

        Ok(report)
    }
}
