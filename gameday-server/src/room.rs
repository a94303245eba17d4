use crate::database::error::DatabaseError;
use crate::database::{Connection, Repository};
use crate::room::model::{GameId, NewRoom, Room, TeamHints};
use crate::types::date_time::DateTime;
use tracing::debug;

pub mod model;
pub mod repository;

/// Maps an external game identifier to its room, creating the room on first access.
///
/// Hints only matter when the room is created. Later calls get the stored row back unchanged.
pub async fn resolve_or_create_room(
	repository: &dyn Repository,
	connection: &mut dyn Connection,
	game_id: GameId,
	hints: TeamHints,
	now: DateTime,
) -> Result<Room, DatabaseError> {
	let new_room = NewRoom::from_hints(game_id, hints);
	let room = repository.room().get_or_create(connection, &new_room, now).await?;
	debug!(game_id = %room.game_id, room_uuid = %room.uuid, "Resolved game room");

	Ok(room)
}
