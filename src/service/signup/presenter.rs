//! Announcement embed derivation.
//!
//! Pure function from a session snapshot (plus the already-resolved roster
//! names) to a `RenderSpec`. No I/O happens here; the messaging layer turns
//! the result into an actual Discord embed edit. Display name resolution is the
//! coordinator's job since it talks to the messaging collaborator.

use crate::model::session::{GameSession, RenderField, RenderSpec, SessionStatus};

/// Green: scheduled with open slots.
const COLOR_OPEN: u32 = 0x00ff00;
/// Amber: started, or scheduled at 75%+ of capacity.
const COLOR_NEAR: u32 = 0xff9900;
/// Red: scheduled and full.
const COLOR_FULL: u32 = 0xff0000;
/// Gray: ended.
const COLOR_ENDED: u32 = 0x95a5a6;

pub const EMPTY_ROSTER_TEXT: &str = "No players signed up yet";

/// Derives the announcement embed for a session snapshot.
///
/// `roster_names` must hold one resolved display name per participant, in
/// roster order; the coordinator substitutes a placeholder for any participant
/// whose name could not be resolved, so the render never aborts on a failed
/// lookup.
pub fn render(session: &GameSession, roster_names: &[String]) -> RenderSpec {
    let mut fields = vec![
        RenderField {
            name: "📅 When".to_string(),
            value: session.scheduled_time.clone(),
            inline: true,
        },
        RenderField {
            name: "👥 Attendees".to_string(),
            value: attendees_text(session),
            inline: true,
        },
        RenderField {
            name: "🎯 Status".to_string(),
            value: session.status.label().to_string(),
            inline: true,
        },
    ];

    let roster = if roster_names.is_empty() {
        format!("*{}*", EMPTY_ROSTER_TEXT)
    } else {
        roster_names.join("\n")
    };
    fields.push(RenderField {
        name: "🎮 Signed Up Players".to_string(),
        value: roster,
        inline: false,
    });

    fields.push(RenderField {
        name: "📝 How to Join".to_string(),
        value: instructions_text(session),
        inline: false,
    });

    RenderSpec {
        title: format!("🎮 {}", session.name),
        description: session.description.clone(),
        color: color_tier(session),
        fields,
    }
}

/// Embed color for the session's current state, in priority order:
/// started → amber, ended → gray, full → red, 75%+ of capacity → amber,
/// otherwise green.
fn color_tier(session: &GameSession) -> u32 {
    match session.status {
        SessionStatus::Started => COLOR_NEAR,
        SessionStatus::Completed => COLOR_ENDED,
        SessionStatus::Scheduled => match session.max_players {
            Some(_) if session.is_full() => COLOR_FULL,
            // Near-full threshold: count >= 75% of the cap, in integer math
            Some(max) if session.player_count() * 4 >= max as usize * 3 => COLOR_NEAR,
            _ => COLOR_OPEN,
        },
    }
}

fn attendees_text(session: &GameSession) -> String {
    let count = session.player_count();
    let plural = if count == 1 { "" } else { "s" };
    match session.max_players {
        Some(max) => format!("{} player{} signed up ({}/{})", count, plural, count, max),
        None => format!("{} player{} signed up", count, plural),
    }
}

/// Status/instructions line, jointly determined by status and fullness.
fn instructions_text(session: &GameSession) -> String {
    match session.status {
        SessionStatus::Scheduled => {
            if session.is_full() {
                "❌ This session is full!".to_string()
            } else {
                "React with 🎮 to sign up for this session!".to_string()
            }
        }
        SessionStatus::Started => {
            if session.is_full() {
                "❌ This session is full!\n🚀 This session has started!".to_string()
            } else {
                "🚀 This session has started!".to_string()
            }
        }
        SessionStatus::Completed => "🏁 This session has ended.".to_string(),
    }
}
