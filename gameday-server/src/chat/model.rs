use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use typed_builder::TypedBuilder;

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
	pub uuid: Uuid,
	pub game_room_id: Uuid,
	pub user_id: String,
	pub username: String,
	pub message: String,
	pub team: Team,
	pub role: Role,
	pub avatar_url: Option<String>,
	pub created_at: DateTime,
	pub updated_at: DateTime,
}

#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct NewChatMessage {
	pub game_room_id: Uuid,
	#[builder(setter(into))]
	pub user_id: String,
	#[builder(setter(into))]
	pub username: String,
	#[builder(setter(into))]
	pub message: String,
	pub team: Team,
	#[builder(default)]
	pub role: Role,
	#[builder(default)]
	pub avatar_url: Option<String>,
	pub created_at: DateTime,
}

#[derive(sqlx::Type, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Team {
	Away,
	Home,
}

impl Team {
	pub fn as_str(self) -> &'static str {
		match self {
			Team::Away => "away",
			Team::Home => "home",
		}
	}
}

impl Display for Team {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		formatter.write_str(self.as_str())
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid team '{0}', expected 'away' or 'home'")]
pub struct InvalidTeam(pub String);

impl FromStr for Team {
	type Err = InvalidTeam;

	fn from_str(team: &str) -> Result<Self, Self::Err> {
		match team.trim() {
			"away" => Ok(Team::Away),
			"home" => Ok(Team::Home),
			_ => Err(InvalidTeam(team.to_owned())),
		}
	}
}

#[derive(sqlx::Type, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
	#[default]
	User,
	Moderator,
	Admin,
}
