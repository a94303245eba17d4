use crate::database::error::DatabaseError;
use crate::database::{Connection, Database};
use anyhow::anyhow;
use async_trait::async_trait;

/// Database double whose every operation fails as if the store was down.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnreachableDatabase;

#[async_trait]
impl Database for UnreachableDatabase {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		Err(unreachable())
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		Err(unreachable())
	}

	async fn ping(&self) -> Result<(), DatabaseError> {
		Err(unreachable())
	}
}

fn unreachable() -> DatabaseError {
	DatabaseError::Connection(anyhow!("Database is unreachable"))
}
