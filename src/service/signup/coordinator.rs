//! Signup orchestration.
//!
//! Receives typed reaction events from the gateway and commands from the
//! operator API, mutates the registry through capacity-gate checks, derives
//! the announcement render, and issues edit/notify side effects through the
//! messaging collaborator.
//!
//! Failure semantics: operator-facing failures are structured `SignupError`
//! outcomes; reaction-originated guard failures are silent to the acting user
//! except for their reaction being reverted. Nothing here is process-fatal.

use std::sync::Arc;
use std::time::Duration;

use crate::bot::event::ReactionEvent;
use crate::error::signup::SignupError;
use crate::error::AppError;
use crate::model::session::{CreateSessionParams, GameSession, SessionStatus};
use crate::service::discord::messenger::{Messenger, SIGNUP_EMOJI};
use crate::service::signup::dispatch::{DispatchReport, NotificationDispatcher};
use crate::service::signup::gate::{self, JoinDecision, LeaveDecision};
use crate::service::signup::presenter;
use crate::service::signup::registry::SignupRegistry;

/// How long a started session stays in the registry before being evicted.
/// A memory bound, not user-visible behavior beyond the session disappearing
/// from active listings.
const EVICTION_DELAY: Duration = Duration::from_secs(5 * 60);

/// Fixed delay between consecutive DM sends in a fan-out.
const DISPATCH_PACE: Duration = Duration::from_secs(1);

const UNKNOWN_USER: &str = "Unknown User";

/// Outcome of a join attempt, computed atomically inside the registry lock.
enum JoinOutcome {
    Joined { session: GameSession, changed: bool },
    Rejected { name: String, decision: JoinDecision },
}

/// Outcome of a leave attempt.
enum LeaveOutcome {
    Left { session: GameSession, changed: bool },
    Ignored { name: String },
}

/// Orchestrates game session signups.
pub struct SignupCoordinator {
    registry: SignupRegistry,
    messenger: Arc<dyn Messenger>,
    /// Channel all announcements are posted to.
    signup_channel_id: u64,
    /// Role pinged when a signup is created with `notify_role`.
    notify_role_id: Option<u64>,
    eviction_delay: Duration,
    dispatch_pace: Duration,
}

impl SignupCoordinator {
    pub fn new(
        registry: SignupRegistry,
        messenger: Arc<dyn Messenger>,
        signup_channel_id: u64,
        notify_role_id: Option<u64>,
    ) -> Self {
        Self {
            registry,
            messenger,
            signup_channel_id,
            notify_role_id,
            eviction_delay: EVICTION_DELAY,
            dispatch_pace: DISPATCH_PACE,
        }
    }

    /// Overrides the eviction delay and DM pacing. Test hook.
    #[cfg(test)]
    pub fn with_timings(mut self, eviction_delay: Duration, dispatch_pace: Duration) -> Self {
        self.eviction_delay = eviction_delay;
        self.dispatch_pace = dispatch_pace;
        self
    }

    /// Posts a signup announcement and starts tracking the session under the
    /// posted message's ID.
    ///
    /// The announcement gets the signup reaction seeded so players have
    /// something to click, and an optional @everyone / role ping depending on
    /// the creation flags.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - Snapshot of the newly tracked session
    /// - `Err(AppError)` - Discord posting failed, or (unexpectedly) a signup
    ///   already exists for the posted message ID
    pub async fn create_signup(&self, params: CreateSessionParams) -> Result<GameSession, AppError> {
        // Render the announcement from a draft so posting and tracking see the
        // same embed; the real message ID replaces the placeholder on create.
        let draft = GameSession::new(0, params.clone());
        let render = presenter::render(&draft, &[]);
        let content = self.ping_content(&params);

        let message_id = self
            .messenger
            .send_announcement(self.signup_channel_id, content, &render)
            .await?;

        self.messenger
            .add_signup_reaction(self.signup_channel_id, message_id)
            .await?;

        let session = self.registry.create(message_id, params).await?;

        tracing::info!(
            "Game signup created: \"{}\" at {} ({} max) as message {}",
            session.name,
            session.scheduled_time,
            session
                .max_players
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no".to_string()),
            message_id
        );

        Ok(session)
    }

    /// Handles a signup reaction being added.
    ///
    /// Reactions on untracked messages or with other emoji are silently
    /// ignored. A rejected join (full, or no longer scheduled) does not mutate
    /// state; the triggering reaction is removed so the announcement does not
    /// show a signup that was not accepted.
    pub async fn handle_reaction_add(&self, event: ReactionEvent) {
        if event.emoji != SIGNUP_EMOJI {
            return;
        }

        let outcome = match self
            .registry
            .mutate(event.message_id, |session| {
                match gate::can_join(session, event.participant_id) {
                    JoinDecision::Allowed => {
                        let changed = session.participants.insert(event.participant_id);
                        JoinOutcome::Joined {
                            session: session.clone(),
                            changed,
                        }
                    }
                    decision => JoinOutcome::Rejected {
                        name: session.name.clone(),
                        decision,
                    },
                }
            })
            .await
        {
            Ok(outcome) => outcome,
            // Not a signup message; nothing to do.
            Err(SignupError::NotFound(_)) => return,
            Err(err) => {
                tracing::error!("Join attempt on message {} failed: {}", event.message_id, err);
                return;
            }
        };

        match outcome {
            JoinOutcome::Joined { session, changed } => {
                tracing::info!(
                    "{} signed up for \"{}\" ({}{})",
                    event.participant_id,
                    session.name,
                    session.player_count(),
                    session
                        .max_players
                        .map(|m| format!("/{}", m))
                        .unwrap_or_default()
                );
                if changed {
                    self.refresh_announcement(&session).await;
                }
            }
            JoinOutcome::Rejected { name, decision } => {
                match decision {
                    JoinDecision::Full => tracing::info!(
                        "{} tried to sign up for full game \"{}\"",
                        event.participant_id,
                        name
                    ),
                    _ => tracing::info!(
                        "{} tried to sign up for \"{}\" after signups closed",
                        event.participant_id,
                        name
                    ),
                }
                // Revert the reaction; no error is surfaced to the player.
                if let Err(err) = self
                    .messenger
                    .remove_reaction(self.signup_channel_id, event.message_id, event.participant_id)
                    .await
                {
                    tracing::warn!(
                        "Failed to revert reaction from {} on message {}: {}",
                        event.participant_id,
                        event.message_id,
                        err
                    );
                }
            }
        }
    }

    /// Handles a signup reaction being removed.
    ///
    /// Cancels the participant's signup while the session is still scheduled.
    /// After the session has started the removal is deliberately ignored so a
    /// running session's displayed roster stays intact.
    pub async fn handle_reaction_remove(&self, event: ReactionEvent) {
        if event.emoji != SIGNUP_EMOJI {
            return;
        }

        let outcome = match self
            .registry
            .mutate(event.message_id, |session| {
                match gate::can_leave(session, event.participant_id) {
                    LeaveDecision::Allowed => {
                        let changed = session.participants.shift_remove(&event.participant_id);
                        LeaveOutcome::Left {
                            session: session.clone(),
                            changed,
                        }
                    }
                    LeaveDecision::Ignored => LeaveOutcome::Ignored {
                        name: session.name.clone(),
                    },
                }
            })
            .await
        {
            Ok(outcome) => outcome,
            Err(SignupError::NotFound(_)) => return,
            Err(err) => {
                tracing::error!("Leave attempt on message {} failed: {}", event.message_id, err);
                return;
            }
        };

        match outcome {
            LeaveOutcome::Left { session, changed } => {
                if changed {
                    tracing::info!(
                        "{} cancelled signup for \"{}\" ({}{})",
                        event.participant_id,
                        session.name,
                        session.player_count(),
                        session
                            .max_players
                            .map(|m| format!("/{}", m))
                            .unwrap_or_default()
                    );
                    self.refresh_announcement(&session).await;
                }
            }
            LeaveOutcome::Ignored { name } => {
                tracing::debug!(
                    "Ignoring signup cancellation from {} on non-scheduled game \"{}\"",
                    event.participant_id,
                    name
                );
            }
        }
    }

    /// Marks a scheduled session as started.
    ///
    /// One-directional and not re-entrant: a second call fails with
    /// `InvalidTransition` instead of corrupting state. On success the
    /// announcement is re-rendered and the session is scheduled for eviction
    /// from the registry after a fixed delay.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - Snapshot after the transition
    /// - `Err(SignupError::NotFound)` - No signup tracked for this message
    /// - `Err(SignupError::InvalidTransition)` - Session is not scheduled
    pub async fn mark_started(&self, message_id: u64) -> Result<GameSession, SignupError> {
        let session = self
            .registry
            .mutate(message_id, |session| {
                if session.status != SessionStatus::Scheduled {
                    return Err(SignupError::InvalidTransition);
                }
                session.status = SessionStatus::Started;
                Ok(session.clone())
            })
            .await??;

        tracing::info!("Game \"{}\" marked as started", session.name);

        self.schedule_eviction(message_id).await;
        self.refresh_announcement(&session).await;

        Ok(session)
    }

    /// Fans a direct message out to every participant of the session.
    ///
    /// # Returns
    /// - `Ok(DispatchReport)` - Per-recipient delivery outcome
    /// - `Err(SignupError::NotFound)` - No signup tracked for this message
    /// - `Err(SignupError::NoParticipants)` - Roster is empty
    pub async fn notify_players(
        &self,
        message_id: u64,
        subject: &str,
        body: &str,
    ) -> Result<DispatchReport, SignupError> {
        let session = self
            .registry
            .get(message_id)
            .await
            .ok_or(SignupError::NotFound(message_id))?;

        let dispatcher = NotificationDispatcher::new(self.messenger.clone(), self.dispatch_pace);
        dispatcher.dispatch(&session, subject, body).await
    }

    /// Snapshots of all tracked signups in creation order.
    pub async fn list_signups(&self) -> Vec<GameSession> {
        self.registry.list().await
    }

    /// Snapshot of a single tracked signup.
    pub async fn session(&self, message_id: u64) -> Option<GameSession> {
        self.registry.get(message_id).await
    }

    /// Schedules removal of the registry entry after the eviction delay.
    ///
    /// The timer's abort handle is stored with the entry so an explicit
    /// removal cancels it; a timer that fires after the entry is already gone
    /// hits `remove`'s idempotent no-op path.
    async fn schedule_eviction(&self, message_id: u64) {
        let registry = self.registry.clone();
        let delay = self.eviction_delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.remove(message_id).await;
            tracing::info!("Evicted started game signup {}", message_id);
        });

        self.registry
            .set_eviction(message_id, task.abort_handle())
            .await;
    }

    /// Re-renders the announcement embed from the given snapshot.
    ///
    /// Renders are last-write-wins: each is computed from the snapshot taken
    /// at trigger time. Edit failures are logged, never propagated.
    async fn refresh_announcement(&self, session: &GameSession) {
        let roster = self.resolve_roster(session).await;
        let render = presenter::render(session, &roster);

        if let Err(err) = self
            .messenger
            .edit_announcement(self.signup_channel_id, session.message_id, &render)
            .await
        {
            tracing::error!(
                "Failed to update signup embed for \"{}\": {}",
                session.name,
                err
            );
        }
    }

    /// Resolves display names for the roster, one per participant in order.
    /// A participant whose lookup fails gets a placeholder instead of aborting
    /// the whole render.
    async fn resolve_roster(&self, session: &GameSession) -> Vec<String> {
        let mut names = Vec::with_capacity(session.player_count());
        for participant_id in session.participants.iter().copied() {
            match self.messenger.resolve_display_name(participant_id).await {
                Ok(name) => names.push(name),
                Err(err) => {
                    tracing::warn!("Error fetching user {}: {}", participant_id, err);
                    names.push(UNKNOWN_USER.to_string());
                }
            }
        }
        names
    }

    fn ping_content(&self, params: &CreateSessionParams) -> Option<String> {
        if params.notify_all {
            return Some("@everyone".to_string());
        }
        if params.notify_role {
            match self.notify_role_id {
                Some(role_id) => return Some(format!("<@&{}>", role_id)),
                None => {
                    tracing::warn!("notify_role requested but GAME_NOTIFY_ROLE_ID is not configured")
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::signup::testing::MockMessenger;

    const CHANNEL: u64 = 555;
    const ROLE: u64 = 777;

    fn coordinator(messenger: &Arc<MockMessenger>) -> SignupCoordinator {
        SignupCoordinator::new(
            SignupRegistry::new(),
            messenger.clone() as Arc<dyn Messenger>,
            CHANNEL,
            Some(ROLE),
        )
        .with_timings(Duration::from_secs(300), Duration::ZERO)
    }

    fn params(name: &str, max_players: Option<u32>) -> CreateSessionParams {
        CreateSessionParams {
            name: name.to_string(),
            scheduled_time: "<t:1893456000:R>".to_string(),
            description: None,
            max_players,
            notify_all: false,
            notify_role: false,
        }
    }

    fn join(message_id: u64, participant_id: u64) -> ReactionEvent {
        ReactionEvent {
            message_id,
            participant_id,
            emoji: SIGNUP_EMOJI.to_string(),
        }
    }

    /// Tests creating a signup.
    ///
    /// Expected: Ok with announcement posted, signup reaction seeded, and the
    /// session tracked under the posted message ID
    #[tokio::test]
    async fn creates_signup_and_tracks_message() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);

        let session = coordinator
            .create_signup(params("Game Night", Some(4)))
            .await
            .unwrap();

        assert_eq!(session.status, SessionStatus::Scheduled);
        assert_eq!(messenger.announcements().len(), 1);
        assert_eq!(messenger.seeded_reactions(), vec![session.message_id]);
        assert!(coordinator.session(session.message_id).await.is_some());
    }

    /// Tests the role ping on creation.
    ///
    /// Expected: Ok with the role mention as message content
    #[tokio::test]
    async fn creation_pings_role_when_requested() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);

        let mut create = params("Game Night", None);
        create.notify_role = true;
        coordinator.create_signup(create).await.unwrap();

        let (_, content) = messenger.announcements().pop().unwrap();
        assert_eq!(content.as_deref(), Some("<@&777>"));
    }

    /// Tests the capacity scenario: maxPlayers=2, three join attempts.
    ///
    /// Expected: A and B on the roster, C rejected without mutation and C's
    /// reaction reverted
    #[tokio::test]
    async fn join_respects_capacity_and_reverts_overflow() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Duo Game", Some(2)))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(id, 100)).await;
        coordinator.handle_reaction_add(join(id, 101)).await;
        coordinator.handle_reaction_add(join(id, 102)).await;

        let session = coordinator.session(id).await.unwrap();
        let roster: Vec<u64> = session.participants.iter().copied().collect();
        assert_eq!(roster, vec![100, 101]);
        assert_eq!(messenger.removed_reactions(), vec![(id, 102)]);
    }

    /// Tests join idempotence for an existing member.
    ///
    /// Expected: roster unchanged and no second embed edit for the re-join
    #[tokio::test]
    async fn rejoin_is_idempotent() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", Some(2)))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(id, 100)).await;
        let edits_after_first = messenger.edits().len();
        coordinator.handle_reaction_add(join(id, 100)).await;

        assert_eq!(coordinator.session(id).await.unwrap().player_count(), 1);
        assert_eq!(messenger.edits().len(), edits_after_first);
        assert!(messenger.removed_reactions().is_empty());
    }

    /// Tests reactions on untracked messages and with other emoji.
    ///
    /// Expected: silently ignored, no side effects
    #[tokio::test]
    async fn ignores_untracked_messages_and_other_emoji() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(999_999, 100)).await;
        coordinator
            .handle_reaction_add(ReactionEvent {
                message_id: id,
                participant_id: 100,
                emoji: "👍".to_string(),
            })
            .await;

        assert_eq!(coordinator.session(id).await.unwrap().player_count(), 0);
        assert!(messenger.edits().is_empty());
        assert!(messenger.removed_reactions().is_empty());
    }

    /// Tests leaving twice for the same participant.
    ///
    /// Expected: first leave removes, second is a no-op without an extra edit
    #[tokio::test]
    async fn double_leave_is_noop() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(id, 100)).await;
        coordinator.handle_reaction_remove(join(id, 100)).await;
        assert_eq!(coordinator.session(id).await.unwrap().player_count(), 0);

        let edits_after_leave = messenger.edits().len();
        coordinator.handle_reaction_remove(join(id, 100)).await;
        assert_eq!(messenger.edits().len(), edits_after_leave);
    }

    /// Tests the started-session scenario: maxPlayers=1, join, start, leave.
    ///
    /// Expected: leave after start is a silent no-op, roster still holds A
    #[tokio::test]
    async fn leave_after_start_is_ignored() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Solo Game", Some(1)))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(id, 100)).await;
        coordinator.mark_started(id).await.unwrap();

        coordinator.handle_reaction_remove(join(id, 100)).await;

        let session = coordinator.session(id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Started);
        assert!(session.participants.contains(&100));
    }

    /// Tests that a join after start is rejected and reverted.
    ///
    /// Expected: roster unchanged and the late reaction removed
    #[tokio::test]
    async fn join_after_start_is_reverted() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        coordinator.mark_started(id).await.unwrap();
        coordinator.handle_reaction_add(join(id, 100)).await;

        assert_eq!(coordinator.session(id).await.unwrap().player_count(), 0);
        assert_eq!(messenger.removed_reactions(), vec![(id, 100)]);
    }

    /// Tests that mark-started is not re-entrant.
    ///
    /// Expected: Ok once, then Err(InvalidTransition)
    #[tokio::test]
    async fn mark_started_is_not_reentrant() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        let started = coordinator.mark_started(id).await.unwrap();
        assert_eq!(started.status, SessionStatus::Started);

        let second = coordinator.mark_started(id).await;
        assert_eq!(second.unwrap_err(), SignupError::InvalidTransition);
    }

    /// Tests mark-started on an unknown message.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn mark_started_unknown_session_fails() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);

        let result = coordinator.mark_started(42).await;
        assert_eq!(result.unwrap_err(), SignupError::NotFound(42));
    }

    /// Tests eviction of a started session after the delay.
    ///
    /// Expected: Ok with the entry gone once the timer fires
    #[tokio::test]
    async fn started_session_is_evicted_after_delay() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = SignupCoordinator::new(
            SignupRegistry::new(),
            messenger.clone() as Arc<dyn Messenger>,
            CHANNEL,
            None,
        )
        .with_timings(Duration::from_millis(20), Duration::ZERO);

        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        coordinator.mark_started(id).await.unwrap();
        assert!(coordinator.session(id).await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(coordinator.session(id).await.is_none());
    }

    /// Tests that explicit removal cancels the pending eviction timer.
    ///
    /// Expected: Ok with no timer firing against the removed (and reused) ID
    #[tokio::test]
    async fn removal_cancels_eviction_timer() {
        let messenger = Arc::new(MockMessenger::new());
        let registry = SignupRegistry::new();
        let coordinator = SignupCoordinator::new(
            registry.clone(),
            messenger.clone() as Arc<dyn Messenger>,
            CHANNEL,
            None,
        )
        .with_timings(Duration::from_millis(40), Duration::ZERO);

        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;
        coordinator.mark_started(id).await.unwrap();

        registry.remove(id).await;
        // Re-track the same message ID before the original timer would fire
        registry.create(id, params("Replacement", None)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(registry.get(id).await.is_some());
    }

    /// Tests notifying a session with an empty roster.
    ///
    /// Expected: Err(NoParticipants) without any send attempt
    #[tokio::test]
    async fn notify_empty_roster_fails() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        let result = coordinator.notify_players(id, "Reminder", "Soon").await;
        assert_eq!(result.unwrap_err(), SignupError::NoParticipants);
        assert!(messenger.direct_messages().is_empty());
    }

    /// Tests notifying a populated roster.
    ///
    /// Expected: Ok with one DM per participant
    #[tokio::test]
    async fn notify_reaches_all_participants() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);
        let id = coordinator
            .create_signup(params("Game Night", None))
            .await
            .unwrap()
            .message_id;

        coordinator.handle_reaction_add(join(id, 100)).await;
        coordinator.handle_reaction_add(join(id, 101)).await;

        let report = coordinator
            .notify_players(id, "Reminder", "Starting soon")
            .await
            .unwrap();
        assert_eq!(report.sent_count, 2);
        assert_eq!(messenger.direct_messages().len(), 2);
    }

    /// Tests that listings reflect creation order.
    ///
    /// Expected: Ok with sessions listed oldest first
    #[tokio::test]
    async fn lists_signups_in_creation_order() {
        let messenger = Arc::new(MockMessenger::new());
        let coordinator = coordinator(&messenger);

        coordinator.create_signup(params("First", None)).await.unwrap();
        coordinator.create_signup(params("Second", None)).await.unwrap();

        let names: Vec<String> = coordinator
            .list_signups()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
