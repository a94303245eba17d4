use crate::chat::ChatService;
use crate::configuration::Configuration;
use crate::database::sqlite::{SqliteDatabase, SqliteRepository};
use crate::database::{Database, Repository};
use crate::utils::time_source::TimeSource;
use crate::voice::conference::ConferenceBridge;
use crate::voice::token::VoiceTokenService;
use anyhow::Context;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub time_source: TimeSource,
	pub database: Arc<dyn Database>,
	pub repository: Arc<dyn Repository>,
	pub chat: ChatService,
	pub voice_tokens: VoiceTokenService,
	pub conference: ConferenceBridge,
}

impl ApplicationContext {
	/// Connects to the configured database and applies pending migrations.
	pub async fn new(configuration: Configuration, time_source: TimeSource) -> anyhow::Result<ApplicationContext> {
		let mut database = SqliteDatabase::connect(&configuration.database_url)
			.await
			.with_context(|| format!("Failed to connect to database at '{}'", configuration.database_url))?;
		database.migrate().await.context("Failed to migrate database")?;

		Ok(Self::from_parts(
			configuration,
			time_source,
			Arc::new(database),
			Arc::new(SqliteRepository),
		))
	}

	pub fn from_parts(
		configuration: Configuration,
		time_source: TimeSource,
		database: Arc<dyn Database>,
		repository: Arc<dyn Repository>,
	) -> ApplicationContext {
		let chat = ChatService::new(database.clone(), repository.clone(), time_source.clone());
		let voice_tokens = VoiceTokenService::new(configuration.twilio.clone(), time_source.clone());
		let conference = ConferenceBridge::new(configuration.public_base_url.clone());

		Self {
			configuration,
			time_source,
			database,
			repository,
			chat,
			voice_tokens,
			conference,
		}
	}
}
