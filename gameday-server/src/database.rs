use crate::chat::repository::ChatRepository;
use crate::database::error::DatabaseError;
use crate::room::repository::RoomRepository;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;
use std::any::{Any, type_name};

pub mod error;
pub mod sqlite;

#[async_trait]
pub trait Database: Send + Sync {
	async fn migrate(&mut self) -> Result<(), DatabaseError>;

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError>;

	/// Round trip to the store, used by health checks.
	async fn ping(&self) -> Result<(), DatabaseError>;
}

assert_obj_safe!(Database);

pub trait Connection: Any + Send + Sync {
	fn type_name(&self) -> &'static str {
		type_name::<Self>()
	}
}

assert_obj_safe!(Connection);

pub trait Repository: RoomRepository + ChatRepository + Send + Sync + 'static {
	fn room(&self) -> &dyn RoomRepository;
	fn chat(&self) -> &dyn ChatRepository;
}

assert_obj_safe!(Repository);
