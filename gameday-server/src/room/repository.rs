use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::room::model;
use crate::types::date_time::DateTime;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;


#[async_trait]
pub trait RoomRepository: Send + Sync + 'static {
	async fn get_by_game_id(
		&self,
		connection: &mut dyn Connection,
		game_id: &model::GameId,
	) -> Result<Option<model::Room>, DatabaseError>;

	/// Plain insert, fails with [`DatabaseError::UniqueViolation`] if the game already has a room.
	async fn create(
		&self,
		connection: &mut dyn Connection,
		room: &model::NewRoom,
		created_at: DateTime,
	) -> Result<model::Room, DatabaseError>;

	/// Inserts the room unless one exists for the game, in which case the existing row is
	/// returned untouched. A single statement, so concurrent callers always end up with the same
	/// row.
	async fn get_or_create(
		&self,
		connection: &mut dyn Connection,
		room: &model::NewRoom,
		created_at: DateTime,
	) -> Result<model::Room, DatabaseError>;
}

assert_obj_safe!(RoomRepository);
