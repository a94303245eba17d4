use crate::chat::repository::ChatRepository;
use crate::database::error::{DatabaseError, IntoStoreResult};
use crate::database::{Connection, Database, Repository};
use crate::room::repository::RoomRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, migrate, query};
use std::any::Any;
use std::ops::DerefMut;
use std::str::FromStr;

mod chat;
mod room;
#[cfg(test)]
pub mod test_utils;

#[derive(Clone)]
pub struct SqliteDatabase {
	pool: SqlitePool,
}

impl SqliteDatabase {
	pub async fn connect(database_url: &str) -> Result<Self, DatabaseError> {
		let options = SqliteConnectOptions::from_str(database_url)
			.connection_error("Invalid database URL")?
			.create_if_missing(true);
		let pool = SqlitePool::connect_with(options)
			.await
			.connection_error("Failed to connect to database")?;

		Ok(Self { pool })
	}

	/// Private in-memory database.
	///
	/// Limited to a single connection since concurrent writers on a shared in-memory cache fail
	/// with table locks instead of waiting for each other.
	pub async fn in_memory() -> Result<Self, DatabaseError> {
		let options = SqliteConnectOptions::from_str("sqlite::memory:").connection_error("Invalid database URL")?;
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.min_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect_with(options)
			.await
			.connection_error("Failed to create in-memory database")?;

		Ok(Self { pool })
	}
}

#[async_trait]
impl Database for SqliteDatabase {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		migrate!().run(&self.pool).await.map_err(Into::into)
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		self.pool
			.acquire()
			.await
			.map(|connection| Box::new(connection) as Box<dyn Connection>)
			.map_err(Into::into)
	}

	async fn ping(&self) -> Result<(), DatabaseError> {
		query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}
}

impl Connection for SqliteConnection {}
impl Connection for PoolConnection<Sqlite> {}

#[derive(Default, Clone, Copy)]
pub struct SqliteRepository;

impl Repository for SqliteRepository {
	fn room(&self) -> &dyn RoomRepository {
		self
	}

	fn chat(&self) -> &dyn ChatRepository {
		self
	}
}

fn sqlite_connection(connection: &mut dyn Connection) -> Result<&mut SqliteConnection, DatabaseError> {
	let type_name = connection.type_name();

	let connection: &mut dyn Any = connection;

	if connection.is::<PoolConnection<Sqlite>>() {
		return connection
			.downcast_mut::<PoolConnection<Sqlite>>()
			.map(DerefMut::deref_mut)
			.ok_or_else(|| DatabaseError::DatabaseMismatch(anyhow!("Expected SQLite connection, got {type_name}")));
	}

	connection
		.downcast_mut::<SqliteConnection>()
		.ok_or_else(|| DatabaseError::DatabaseMismatch(anyhow!("Expected SQLite connection, got {type_name}")))
}
