//! Domain models for game session signups.
//!
//! Defines the in-memory session record tracked per announcement message,
//! creation parameters, and the render instruction the presenter produces.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;

/// Lifecycle status of a game session.
///
/// Transitions are one-directional: `Scheduled → Started → Completed`.
/// `Completed` is declared for completeness of the model; no operator or
/// reaction path currently transitions into it — started sessions are evicted
/// from the registry instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Scheduled,
    Started,
    Completed,
}

impl SessionStatus {
    /// Operator-facing label, used in listings and the announcement embed.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Started => "Started",
            Self::Completed => "Ended",
        }
    }
}

/// A scheduled game session tracked by the signup registry.
///
/// Identified by the Discord message ID of its announcement; that ID is
/// externally assigned and immutable after creation. All state is
/// process-lifetime, in-memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// ID of the announcement message this session is bound to.
    pub message_id: u64,
    /// Title of the game session.
    pub name: String,
    /// Opaque display string for when the session happens (e.g. a Discord
    /// `<t:...>` timestamp). Echoed into the embed, never parsed.
    pub scheduled_time: String,
    /// Optional free-text description shown in the announcement.
    pub description: Option<String>,
    /// Optional upper bound on the roster size. `None` means unbounded.
    pub max_players: Option<u32>,
    /// Signed-up player IDs. Insertion order is the display order.
    pub participants: IndexSet<u64>,
    pub status: SessionStatus,
    /// Whether @everyone was pinged when the announcement was posted.
    /// Informational only; does not affect later behavior.
    pub notify_all: bool,
    /// Whether the game notification role was pinged at creation.
    /// Informational only; does not affect later behavior.
    pub notify_role: bool,
    /// Timestamp when the signup was created.
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    /// Builds a freshly scheduled session bound to an announcement message.
    pub fn new(message_id: u64, params: CreateSessionParams) -> Self {
        Self {
            message_id,
            name: params.name,
            scheduled_time: params.scheduled_time,
            description: params.description,
            max_players: params.max_players,
            participants: IndexSet::new(),
            status: SessionStatus::Scheduled,
            notify_all: params.notify_all,
            notify_role: params.notify_role,
            created_at: Utc::now(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster has reached the player cap. Unbounded sessions are
    /// never full.
    pub fn is_full(&self) -> bool {
        match self.max_players {
            Some(max) => self.participants.len() >= max as usize,
            None => false,
        }
    }
}

/// Parameters for creating a new game session signup.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub name: String,
    pub scheduled_time: String,
    pub description: Option<String>,
    pub max_players: Option<u32>,
    pub notify_all: bool,
    pub notify_role: bool,
}

/// A single embed field in a render instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Render instruction derived from a session snapshot.
///
/// Produced by the presenter as pure data; the messaging layer turns it into
/// an actual Discord embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSpec {
    pub title: String,
    pub description: Option<String>,
    /// Embed color as hex integer (e.g. 0x00ff00 for green).
    pub color: u32,
    pub fields: Vec<RenderField>,
}
