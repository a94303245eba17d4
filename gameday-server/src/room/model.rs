use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use sqlx::FromRow;
use std::fmt::{Display, Formatter};

pub const DEFAULT_AWAY_TEAM: &str = "Away Team";
pub const DEFAULT_HOME_TEAM: &str = "Home Team";

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Room {
	pub uuid: Uuid,
	pub game_id: String,
	pub away_team: String,
	pub home_team: String,
	pub is_active: bool,
	pub created_at: DateTime,
	pub updated_at: DateTime,
}

/// External identifier of a game, never blank.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
	pub fn parse(game_id: &str) -> Option<Self> {
		let game_id = game_id.trim();
		(!game_id.is_empty()).then(|| Self(game_id.to_owned()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for GameId {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		formatter.write_str(&self.0)
	}
}

/// Team names a caller may supply for a room that doesn't exist yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamHints {
	pub away_team: Option<String>,
	pub home_team: Option<String>,
}

impl TeamHints {
	pub fn new(away_team: Option<String>, home_team: Option<String>) -> Self {
		Self { away_team, home_team }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRoom {
	pub game_id: GameId,
	pub away_team: String,
	pub home_team: String,
}

impl NewRoom {
	/// Blank hints fall back to the default team names.
	pub fn from_hints(game_id: GameId, TeamHints { away_team, home_team }: TeamHints) -> Self {
		fn or_default(hint: Option<String>, default: &str) -> String {
			hint.map(|name| name.trim().to_owned())
				.filter(|name| !name.is_empty())
				.unwrap_or_else(|| default.to_owned())
		}

		Self {
			game_id,
			away_team: or_default(away_team, DEFAULT_AWAY_TEAM),
			home_team: or_default(home_team, DEFAULT_HOME_TEAM),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn game_id_rejects_blank_input() {
		assert_eq!(None, GameId::parse(""));
		assert_eq!(None, GameId::parse(" \t "));
	}

	#[test]
	fn game_id_trims_whitespace() {
		let game_id = GameId::parse("  nba-2025-01-12  ").expect("Valid game id");

		assert_eq!("nba-2025-01-12", game_id.as_str());
	}

	#[test]
	fn new_room_defaults_missing_and_blank_hints() {
		let game_id = GameId::parse("g1").expect("Valid game id");

		let room = NewRoom::from_hints(game_id, TeamHints::new(None, Some("  ".to_owned())));

		assert_eq!(DEFAULT_AWAY_TEAM, room.away_team);
		assert_eq!(DEFAULT_HOME_TEAM, room.home_team);
	}

	#[test]
	fn new_room_uses_supplied_hints() {
		let game_id = GameId::parse("g1").expect("Valid game id");

		let room = NewRoom::from_hints(
			game_id,
			TeamHints::new(Some("Celtics".to_owned()), Some("Lakers".to_owned())),
		);

		assert_eq!("Celtics", room.away_team);
		assert_eq!("Lakers", room.home_team);
	}
}
