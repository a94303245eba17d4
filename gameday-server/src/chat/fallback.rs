use crate::chat::model::{ChatMessage, Role, Team};
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use chrono::TimeDelta;

/// Fixed conversation served instead of the real history while the store is unavailable.
pub fn demo_conversation(now: DateTime) -> Vec<ChatMessage> {
	const LINES: [(u128, &str, Team, &str, i64); 3] = [
		(1, "SportsFan23", Team::Away, "What a game so far! This is intense!", 5),
		(2, "HomeTeamHero", Team::Home, "Our defense is finally showing up tonight.", 3),
		(3, "CourtsideKing", Team::Away, "That last play was unreal. Did you see that?", 1),
	];

	LINES
		.into_iter()
		.map(|(id, username, team, message, minutes_ago)| {
			let created_at = now.checked_sub(TimeDelta::minutes(minutes_ago)).unwrap_or(now);
			ChatMessage {
				uuid: Uuid::from_u128(id),
				game_room_id: Uuid::nil(),
				user_id: username.to_owned(),
				username: username.to_owned(),
				message: message.to_owned(),
				team,
				role: Role::User,
				avatar_url: None,
				created_at,
				updated_at: created_at,
			}
		})
		.collect()
}
