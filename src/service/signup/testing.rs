//! Recording `Messenger` mock shared by signup service tests.

use std::collections::HashSet;
use std::sync::Mutex;

use serenity::async_trait;

use crate::error::AppError;
use crate::model::session::RenderSpec;
use crate::service::discord::messenger::Messenger;

#[derive(Default)]
struct MockState {
    next_message_id: u64,
    announcements: Vec<(u64, Option<String>)>,
    edits: Vec<(u64, RenderSpec)>,
    seeded_reactions: Vec<u64>,
    removed_reactions: Vec<(u64, u64)>,
    direct_messages: Vec<(u64, String, String)>,
    fail_direct: HashSet<u64>,
    fail_resolve: HashSet<u64>,
}

/// In-memory messenger that records every call and can be told to fail
/// individual recipients.
pub struct MockMessenger {
    state: Mutex<MockState>,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_message_id: 1000,
                ..MockState::default()
            }),
        }
    }

    /// Makes `send_direct` fail for the given participant.
    pub fn fail_direct_for(&self, participant_id: u64) {
        self.state.lock().unwrap().fail_direct.insert(participant_id);
    }

    /// Makes `resolve_display_name` fail for the given participant.
    pub fn fail_resolve_for(&self, participant_id: u64) {
        self.state.lock().unwrap().fail_resolve.insert(participant_id);
    }

    /// Posted announcements as `(message_id, content)` pairs.
    pub fn announcements(&self) -> Vec<(u64, Option<String>)> {
        self.state.lock().unwrap().announcements.clone()
    }

    /// Announcement edits as `(message_id, render)` pairs.
    pub fn edits(&self) -> Vec<(u64, RenderSpec)> {
        self.state.lock().unwrap().edits.clone()
    }

    /// Message IDs that had the signup reaction seeded.
    pub fn seeded_reactions(&self) -> Vec<u64> {
        self.state.lock().unwrap().seeded_reactions.clone()
    }

    /// Reverted reactions as `(message_id, participant_id)` pairs.
    pub fn removed_reactions(&self) -> Vec<(u64, u64)> {
        self.state.lock().unwrap().removed_reactions.clone()
    }

    /// Sent DMs as `(participant_id, subject, body)` tuples.
    pub fn direct_messages(&self) -> Vec<(u64, String, String)> {
        self.state.lock().unwrap().direct_messages.clone()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_announcement(
        &self,
        _channel_id: u64,
        content: Option<String>,
        _render: &RenderSpec,
    ) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();
        state.next_message_id += 1;
        let message_id = state.next_message_id;
        state.announcements.push((message_id, content));
        Ok(message_id)
    }

    async fn edit_announcement(
        &self,
        _channel_id: u64,
        message_id: u64,
        render: &RenderSpec,
    ) -> Result<(), AppError> {
        self.state
            .lock()
            .unwrap()
            .edits
            .push((message_id, render.clone()));
        Ok(())
    }

    async fn add_signup_reaction(&self, _channel_id: u64, message_id: u64) -> Result<(), AppError> {
        self.state.lock().unwrap().seeded_reactions.push(message_id);
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _channel_id: u64,
        message_id: u64,
        participant_id: u64,
    ) -> Result<(), AppError> {
        self.state
            .lock()
            .unwrap()
            .removed_reactions
            .push((message_id, participant_id));
        Ok(())
    }

    async fn resolve_display_name(&self, participant_id: u64) -> Result<String, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_resolve.contains(&participant_id) {
            return Err(AppError::InternalError(format!(
                "no such user {}",
                participant_id
            )));
        }
        Ok(format!("User{}", participant_id))
    }

    async fn send_direct(
        &self,
        participant_id: u64,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_direct.contains(&participant_id) {
            return Err(AppError::InternalError(format!(
                "cannot DM user {}",
                participant_id
            )));
        }
        state
            .direct_messages
            .push((participant_id, subject.to_string(), body.to_string()));
        Ok(())
    }
}
