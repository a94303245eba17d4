use crate::chat::fallback::demo_conversation;
use crate::chat::model::{ChatMessage, InvalidTeam, NewChatMessage, Role, Team};
use crate::database::error::DatabaseError;
use crate::database::{Database, Repository};
use crate::room::model::{GameId, NewRoom, Room, TeamHints};
use crate::room::resolve_or_create_room;
use crate::utils::time_source::TimeSource;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod fallback;
pub mod model;
pub mod repository;

#[derive(Clone)]
pub struct ChatService {
	database: Arc<dyn Database>,
	repository: Arc<dyn Repository>,
	time_source: TimeSource,
}

/// Outcome of reading a room's history.
#[derive(Debug)]
pub enum ChatHistory {
	Live { room: Room, messages: Vec<ChatMessage> },
	/// The store could not be read, `messages` is the demo conversation.
	Degraded { messages: Vec<ChatMessage>, cause: DatabaseError },
}

impl ChatHistory {
	pub fn is_degraded(&self) -> bool {
		matches!(self, ChatHistory::Degraded { .. })
	}

	pub fn messages(&self) -> &[ChatMessage] {
		match self {
			ChatHistory::Live { messages, .. } | ChatHistory::Degraded { messages, .. } => messages,
		}
	}
}

#[derive(Error, Debug)]
pub enum ChatError {
	#[error("Missing required fields: {}", .0.join(", "))]
	MissingFields(Vec<&'static str>),
	#[error(transparent)]
	InvalidTeam(#[from] InvalidTeam),
	#[error("Game room not found")]
	RoomNotFound,
	#[error("Game room already exists")]
	RoomAlreadyExists(Box<Room>),
	#[error("Chat storage failed: {0}")]
	Database(#[from] DatabaseError),
}

/// Unvalidated input of [`ChatService::post_message`].
#[derive(Clone, Debug, Default)]
pub struct PostMessage {
	pub game_id: String,
	pub message: Option<String>,
	pub team: Option<String>,
	pub username: Option<String>,
	pub avatar_url: Option<String>,
	pub hints: TeamHints,
}

impl ChatService {
	pub fn new(database: Arc<dyn Database>, repository: Arc<dyn Repository>, time_source: TimeSource) -> Self {
		Self {
			database,
			repository,
			time_source,
		}
	}

	/// Never fails because of the store: an unreachable store degrades to the demo conversation.
	pub async fn list_messages(&self, game_id: &str, hints: TeamHints) -> Result<ChatHistory, ChatError> {
		let game_id = GameId::parse(game_id).ok_or_else(|| ChatError::MissingFields(vec!["gameId"]))?;

		match self.load_history(game_id.clone(), hints).await {
			Ok((room, messages)) => Ok(ChatHistory::Live { room, messages }),
			Err(cause) => {
				warn!(%game_id, error = %cause, "Chat storage unavailable, serving demo conversation.");
				Ok(ChatHistory::Degraded {
					messages: demo_conversation(self.time_source.now()),
					cause,
				})
			}
		}
	}

	async fn load_history(&self, game_id: GameId, hints: TeamHints) -> Result<(Room, Vec<ChatMessage>), DatabaseError> {
		let mut connection = self.database.connection().await?;
		let room = resolve_or_create_room(
			self.repository.as_ref(),
			&mut *connection,
			game_id,
			hints,
			self.time_source.now(),
		)
		.await?;
		let messages = self.repository.chat().list_for_room(&mut *connection, room.uuid).await?;

		Ok((room, messages))
	}

	pub async fn post_message(
		&self,
		PostMessage {
			game_id,
			message,
			team,
			username,
			avatar_url,
			hints,
		}: PostMessage,
	) -> Result<ChatMessage, ChatError> {
		let mut missing = Vec::new();
		let game_id = GameId::parse(&game_id);
		if game_id.is_none() {
			missing.push("gameId");
		}
		let message = required(message, "message", &mut missing);
		let team = required(team, "team", &mut missing);
		let username = required(username, "username", &mut missing).map(|username| username.trim().to_owned());
		let (Some(game_id), Some(message), Some(team), Some(username)) = (game_id, message, team, username) else {
			return Err(ChatError::MissingFields(missing));
		};
		let team = team.parse::<Team>()?;
		let avatar_url = avatar_url.filter(|url| !url.trim().is_empty());

		let now = self.time_source.now();
		let mut connection = self.database.connection().await?;
		let room = resolve_or_create_room(self.repository.as_ref(), &mut *connection, game_id, hints, now).await?;
		let chat_message = self
			.repository
			.chat()
			.create(
				&mut *connection,
				NewChatMessage::builder()
					.game_room_id(room.uuid)
					.user_id(username.clone())
					.username(username)
					.message(message)
					.team(team)
					.role(Role::User)
					.avatar_url(avatar_url)
					.created_at(now)
					.build(),
			)
			.await?;
		info!(
			game_id = %room.game_id,
			message_uuid = %chat_message.uuid,
			username = %chat_message.username,
			team = %chat_message.team,
			"Stored chat message."
		);

		Ok(chat_message)
	}

	pub async fn get_room(&self, game_id: &str) -> Result<Room, ChatError> {
		let game_id = GameId::parse(game_id).ok_or_else(|| ChatError::MissingFields(vec!["gameId"]))?;

		let mut connection = self.database.connection().await?;
		self.repository
			.room()
			.get_by_game_id(&mut *connection, &game_id)
			.await?
			.ok_or(ChatError::RoomNotFound)
	}

	pub async fn create_room(
		&self,
		game_id: &str,
		away_team: Option<String>,
		home_team: Option<String>,
	) -> Result<Room, ChatError> {
		let mut missing = Vec::new();
		let game_id = GameId::parse(game_id);
		if game_id.is_none() {
			missing.push("gameId");
		}
		let away_team = required(away_team, "awayTeam", &mut missing);
		let home_team = required(home_team, "homeTeam", &mut missing);
		let (Some(game_id), Some(away_team), Some(home_team)) = (game_id, away_team, home_team) else {
			return Err(ChatError::MissingFields(missing));
		};

		let new_room = NewRoom::from_hints(game_id, TeamHints::new(Some(away_team), Some(home_team)));
		let mut connection = self.database.connection().await?;
		match self
			.repository
			.room()
			.create(&mut *connection, &new_room, self.time_source.now())
			.await
		{
			Ok(room) => {
				info!(game_id = %room.game_id, room_uuid = %room.uuid, "Created game room.");
				Ok(room)
			}
			Err(DatabaseError::UniqueViolation(_)) => {
				let existing = self
					.repository
					.room()
					.get_by_game_id(&mut *connection, &new_room.game_id)
					.await?
					.ok_or(ChatError::RoomNotFound)?;
				Err(ChatError::RoomAlreadyExists(Box::new(existing)))
			}
			Err(error) => Err(error.into()),
		}
	}
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
	let value = value.filter(|value| !value.trim().is_empty());
	if value.is_none() {
		missing.push(field);
	}
	value
}
