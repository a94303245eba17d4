use super::{SqliteRepository, sqlite_connection};
use crate::chat::model::{ChatMessage, NewChatMessage};
use crate::chat::repository::ChatRepository;
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::types::uuid::Uuid;
use async_trait::async_trait;
use sqlx::query_as;

#[async_trait]
impl ChatRepository for SqliteRepository {
	async fn create(
		&self,
		connection: &mut dyn Connection,
		NewChatMessage {
			game_room_id,
			user_id,
			username,
			message,
			team,
			role,
			avatar_url,
			created_at,
		}: NewChatMessage,
	) -> Result<ChatMessage, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let uuid = Uuid::new_v4();
		query_as(
			"INSERT INTO chat_messages(
				uuid, game_room_id, user_id, username, message, team, role, avatar_url, created_at, updated_at
			) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
			RETURNING
				uuid,
				game_room_id,
				user_id,
				username,
				message,
				team,
				role,
				avatar_url,
				created_at,
				updated_at
			",
		)
		.bind(uuid)
		.bind(game_room_id)
		.bind(user_id)
		.bind(username)
		.bind(message)
		.bind(team)
		.bind(role)
		.bind(avatar_url)
		.bind(created_at)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}

	async fn list_for_room(
		&self,
		connection: &mut dyn Connection,
		game_room_id: Uuid,
	) -> Result<Vec<ChatMessage>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT uuid, game_room_id, user_id, username, message, team, role, avatar_url, created_at, updated_at
			FROM chat_messages
			WHERE game_room_id = ?1
			ORDER BY created_at ASC, rowid ASC",
		)
		.bind(game_room_id)
		.fetch_all(connection)
		.await
		.map_err(Into::into)
	}
}
