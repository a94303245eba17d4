use super::{SqliteRepository, sqlite_connection};
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::room::model::{GameId, NewRoom, Room};
use crate::room::repository::RoomRepository;
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use async_trait::async_trait;
use sqlx::query_as;

#[async_trait]
impl RoomRepository for SqliteRepository {
	async fn get_by_game_id(
		&self,
		connection: &mut dyn Connection,
		game_id: &GameId,
	) -> Result<Option<Room>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT uuid, game_id, away_team, home_team, is_active, created_at, updated_at
			FROM game_rooms
			WHERE game_id = ?1",
		)
		.bind(game_id.as_str())
		.fetch_optional(connection)
		.await
		.map_err(Into::into)
	}

	async fn create(
		&self,
		connection: &mut dyn Connection,
		NewRoom {
			game_id,
			away_team,
			home_team,
		}: &NewRoom,
		created_at: DateTime,
	) -> Result<Room, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let uuid = Uuid::new_v4();
		query_as(
			r"INSERT INTO game_rooms(uuid, game_id, away_team, home_team, is_active, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, TRUE, ?5, ?5)
			RETURNING
				uuid,
				game_id,
				away_team,
				home_team,
				is_active,
				created_at,
				updated_at",
		)
		.bind(uuid)
		.bind(game_id.as_str())
		.bind(away_team)
		.bind(home_team)
		.bind(created_at)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}

	async fn get_or_create(
		&self,
		connection: &mut dyn Connection,
		NewRoom {
			game_id,
			away_team,
			home_team,
		}: &NewRoom,
		created_at: DateTime,
	) -> Result<Room, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		// The no-op update only touches `game_id`, which doesn't fire the `updated_at` trigger,
		// but it makes RETURNING yield the existing row on conflict.
		let uuid = Uuid::new_v4();
		query_as(
			r"INSERT INTO game_rooms(uuid, game_id, away_team, home_team, is_active, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, TRUE, ?5, ?5)
			ON CONFLICT(game_id) DO UPDATE SET game_id = excluded.game_id
			RETURNING
				uuid,
				game_id,
				away_team,
				home_team,
				is_active,
				created_at,
				updated_at",
		)
		.bind(uuid)
		.bind(game_id.as_str())
		.bind(away_team)
		.bind(home_team)
		.bind(created_at)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}
}
