use crate::chat::model::{ChatMessage, Role, Team};
use crate::room::model::{Room, TeamHints};
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use crate::voice::token::VoiceToken;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameRoomResponse {
	pub id: Uuid,
	pub game_id: String,
	pub away_team: String,
	pub home_team: String,
	pub is_active: bool,
	pub created_at: DateTime,
	pub updated_at: DateTime,
}

impl From<Room> for GameRoomResponse {
	fn from(room: Room) -> Self {
		Self {
			id: room.uuid,
			game_id: room.game_id,
			away_team: room.away_team,
			home_team: room.home_team,
			is_active: room.is_active,
			created_at: room.created_at,
			updated_at: room.updated_at,
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
	pub id: Uuid,
	pub game_room_id: Uuid,
	pub user_id: String,
	pub username: String,
	pub message: String,
	pub team: Team,
	pub role: Role,
	pub avatar_url: Option<String>,
	pub created_at: DateTime,
	pub updated_at: DateTime,
	/// Same instant as `created_at`, kept for clients that render a message time.
	pub timestamp: DateTime,
}

impl From<ChatMessage> for ChatMessageResponse {
	fn from(message: ChatMessage) -> Self {
		Self {
			id: message.uuid,
			game_room_id: message.game_room_id,
			user_id: message.user_id,
			username: message.username,
			message: message.message,
			team: message.team,
			role: message.role,
			avatar_url: message.avatar_url,
			created_at: message.created_at,
			updated_at: message.updated_at,
			timestamp: message.created_at,
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamHintsQuery {
	pub away_team: Option<String>,
	pub home_team: Option<String>,
}

impl From<TeamHintsQuery> for TeamHints {
	fn from(TeamHintsQuery { away_team, home_team }: TeamHintsQuery) -> Self {
		TeamHints::new(away_team, home_team)
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesResponse {
	pub success: bool,
	pub messages: Vec<ChatMessageResponse>,
	pub game_room: Option<GameRoomResponse>,
	pub fallback: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PostMessageRequest {
	pub message: Option<String>,
	pub team: Option<String>,
	pub username: Option<String>,
	pub away_team: Option<String>,
	pub home_team: Option<String>,
	pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostMessageResponse {
	pub success: bool,
	pub message: ChatMessageResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRoomRequest {
	pub away_team: Option<String>,
	pub home_team: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameRoomEnvelope {
	pub success: bool,
	pub game_room: GameRoomResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceTokenRequest {
	pub identity: Option<String>,
	pub room_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTokenResponse {
	pub success: bool,
	pub token: String,
	pub identity: String,
	pub room_name: String,
	pub conference: String,
	pub expires_at: DateTime,
}

impl From<VoiceToken> for VoiceTokenResponse {
	fn from(voice_token: VoiceToken) -> Self {
		Self {
			success: true,
			token: voice_token.token,
			identity: voice_token.identity,
			room_name: voice_token.room_name,
			conference: voice_token.conference,
			expires_at: voice_token.expires_at,
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthResponse {
	pub status: String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub error: Option<String>,
}
