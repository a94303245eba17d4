use crate::chat::model;
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::types::uuid::Uuid;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;


#[async_trait]
pub trait ChatRepository: Send + Sync + 'static {
	async fn create(
		&self,
		connection: &mut dyn Connection,
		message: model::NewChatMessage,
	) -> Result<model::ChatMessage, DatabaseError>;

	/// Full history of a room, oldest first. Messages with equal timestamps keep insertion order.
	async fn list_for_room(
		&self,
		connection: &mut dyn Connection,
		game_room_id: Uuid,
	) -> Result<Vec<model::ChatMessage>, DatabaseError>;
}

assert_obj_safe!(ChatRepository);
