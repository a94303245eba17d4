use crate::database::sqlite::{SqliteDatabase, SqliteRepository};
use crate::database::test::TestFactory;
use crate::database::{Connection, Database, Repository};
use std::sync::Arc;
use tempfile::TempDir;

pub struct SqliteTestFactory;

impl TestFactory for SqliteTestFactory {
	async fn connection() -> Box<dyn Connection> {
		connection().await
	}

	async fn database() -> Arc<dyn Database> {
		database().await
	}

	async fn file_database() -> (Arc<dyn Database>, TempDir) {
		file_database().await
	}

	fn repository() -> Arc<dyn Repository> {
		repository()
	}
}

pub async fn connection() -> Box<dyn Connection> {
	database()
		.await
		.connection()
		.await
		.expect("Failed to connect to database")
}

pub async fn database() -> Arc<dyn Database> {
	let mut database = SqliteDatabase::in_memory()
		.await
		.expect("Failed to create in-memory SQLite database");
	database.migrate().await.expect("Failed to migrate database");

	Arc::new(database)
}

pub async fn file_database() -> (Arc<dyn Database>, TempDir) {
	let directory = tempfile::tempdir().expect("Failed to create temp dir");
	let url = format!("sqlite://{}", directory.path().join("gameday.sqlite").display());
	let mut database = SqliteDatabase::connect(&url)
		.await
		.expect("Failed to create file-backed SQLite database");
	database.migrate().await.expect("Failed to migrate database");

	(Arc::new(database), directory)
}

pub fn repository() -> Arc<dyn Repository> {
	Arc::new(SqliteRepository)
}
