//! Request and response DTOs for the operator API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginDto {
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenDto {
    pub token: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct CreateSignupDto {
    pub name: String,
    /// Display string for when the session happens, echoed verbatim into the
    /// announcement (typically a Discord `<t:...>` timestamp).
    pub scheduled_time: String,
    pub description: Option<String>,
    pub max_players: Option<u32>,
    #[serde(default)]
    pub notify_all: bool,
    #[serde(default)]
    pub notify_role: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct CreatedSignupDto {
    pub message: String,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub message_id: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct SignupSummaryDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub message_id: u64,
    pub name: String,
    pub scheduled_time: String,
    pub player_count: usize,
    pub max_players: Option<u32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct NotifyPlayersDto {
    pub subject: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct NotifyReportDto {
    pub message: String,
    pub sent_count: usize,
    pub failed_count: usize,
    pub details: Vec<NotifyDetailDto>,
}

/// Per-recipient outcome of a notification fan-out.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct NotifyDetailDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub user_id: u64,
    pub display_name: String,
    pub delivered: bool,
    pub error: Option<String>,
}

/// Serializes Discord snowflake IDs as strings to avoid JavaScript number
/// precision loss on the dashboard side.
fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Tests the JSON wire format for snowflake IDs.
    ///
    /// Expected: message_id serialized as a string, above JavaScript's safe
    /// integer range included
    #[test]
    fn snowflake_ids_serialize_as_strings() {
        let dto = CreatedSignupDto {
            message: "Game signup created successfully".to_string(),
            message_id: 9_007_199_254_740_993,
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["message_id"], json!("9007199254740993"));
    }

    /// Tests parsing a string-encoded snowflake ID back to u64.
    ///
    /// Expected: Ok with the numeric value restored
    #[test]
    fn snowflake_ids_deserialize_from_strings() {
        let dto: SignupSummaryDto = serde_json::from_value(json!({
            "message_id": "1393296204405801030",
            "name": "Game Night",
            "scheduled_time": "<t:1893456000:R>",
            "player_count": 2,
            "max_players": 4,
            "status": "Scheduled",
            "created_at": "2026-08-28T12:00:00Z",
        }))
        .unwrap();

        assert_eq!(dto.message_id, 1_393_296_204_405_801_030);
    }

    /// Tests a non-numeric string in an ID position.
    ///
    /// Expected: Err from deserialization
    #[test]
    fn malformed_snowflake_is_rejected() {
        let result: Result<CreatedSignupDto, _> = serde_json::from_value(json!({
            "message": "ok",
            "message_id": "not-a-number",
        }));
        assert!(result.is_err());
    }
}
