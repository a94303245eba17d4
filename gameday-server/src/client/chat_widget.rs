use crate::chat::fallback::demo_conversation;
use crate::chat::model::{Role, Team};
use crate::client::api::{ChatApi, ClientError};
use crate::room::model::TeamHints;
use crate::server::rest_api::models::{ChatMessageResponse, PostMessageRequest};
use crate::types::uuid::Uuid;
use crate::utils::time_source::TimeSource;
use thiserror::Error;
use tracing::warn;

pub const MAX_MESSAGE_LENGTH: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPhase {
	Idle,
	Sending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinedChat {
	pub team: Team,
	pub identity: String,
	pub messages: Vec<ChatMessageResponse>,
	pub phase: SendPhase,
	/// Set once anything shown didn't come from the server's live store.
	pub offline: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatWidgetState {
	NotJoined,
	Joined(JoinedChat),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatWidgetError {
	#[error("Already joined the chat.")]
	AlreadyJoined,
	#[error("Join the chat before sending messages.")]
	NotJoined,
	#[error("An identity is required to join.")]
	MissingIdentity,
	#[error("A message is still being sent.")]
	Busy,
	#[error("Message is empty.")]
	EmptyMessage,
	#[error("Message is {length} characters long, which exceeds the limit.")]
	MessageTooLong { length: usize },
}

/// Text accepted by [`ChatWidget::begin_send`], waiting for the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMessage {
	pub text: String,
}

pub struct ChatWidget<Api> {
	api: Api,
	game_id: String,
	hints: TeamHints,
	time_source: TimeSource,
	state: ChatWidgetState,
}

impl<Api: ChatApi> ChatWidget<Api> {
	pub fn new(api: Api, game_id: impl Into<String>, hints: TeamHints, time_source: TimeSource) -> Self {
		Self {
			api,
			game_id: game_id.into(),
			hints,
			time_source,
			state: ChatWidgetState::NotJoined,
		}
	}

	pub fn state(&self) -> &ChatWidgetState {
		&self.state
	}

	/// Joining is final, the history is fetched exactly once here.
	pub async fn join(&mut self, team: Team, identity: &str) -> Result<(), ChatWidgetError> {
		if matches!(self.state, ChatWidgetState::Joined(_)) {
			return Err(ChatWidgetError::AlreadyJoined);
		}
		let identity = identity.trim();
		if identity.is_empty() {
			return Err(ChatWidgetError::MissingIdentity);
		}

		let (messages, offline) = match self.api.list_messages(&self.game_id, &self.hints).await {
			Ok(history) => (history.messages, history.fallback),
			Err(error) => {
				warn!(game_id = %self.game_id, %error, "Failed to load chat history, showing demo messages.");
				let demo = demo_conversation(self.time_source.now())
					.into_iter()
					.map(ChatMessageResponse::from)
					.collect();
				(demo, true)
			}
		};

		self.state = ChatWidgetState::Joined(JoinedChat {
			team,
			identity: identity.to_owned(),
			messages,
			phase: SendPhase::Idle,
			offline,
		});
		Ok(())
	}

	pub async fn send(&mut self, text: &str) -> Result<(), ChatWidgetError> {
		let pending = self.begin_send(text)?;
		let JoinedChat { team, identity, .. } = self.joined()?;
		let request = PostMessageRequest {
			message: Some(pending.text.clone()),
			team: Some(team.to_string()),
			username: Some(identity.clone()),
			away_team: self.hints.away_team.clone(),
			home_team: self.hints.home_team.clone(),
			avatar_url: None,
		};

		let result = self.api.post_message(&self.game_id, &request).await;
		self.complete_send(pending, result)
	}

	/// Moves from idle to sending.
	pub fn begin_send(&mut self, text: &str) -> Result<PendingMessage, ChatWidgetError> {
		let ChatWidgetState::Joined(joined) = &mut self.state else {
			return Err(ChatWidgetError::NotJoined);
		};
		if joined.phase == SendPhase::Sending {
			return Err(ChatWidgetError::Busy);
		}
		let text = text.trim();
		if text.is_empty() {
			return Err(ChatWidgetError::EmptyMessage);
		}
		let length = text.chars().count();
		if length > MAX_MESSAGE_LENGTH {
			return Err(ChatWidgetError::MessageTooLong { length });
		}

		joined.phase = SendPhase::Sending;
		Ok(PendingMessage { text: text.to_owned() })
	}

	/// Appends the stored message, or a local stand-in if the server failed, and returns to idle.
	pub fn complete_send(
		&mut self,
		pending: PendingMessage,
		result: Result<ChatMessageResponse, ClientError>,
	) -> Result<(), ChatWidgetError> {
		let now = self.time_source.now();
		let ChatWidgetState::Joined(joined) = &mut self.state else {
			return Err(ChatWidgetError::NotJoined);
		};

		let message = match result {
			Ok(message) => message,
			Err(error) => {
				warn!(game_id = %self.game_id, %error, "Failed to send chat message, keeping it locally.");
				joined.offline = true;
				ChatMessageResponse {
					id: Uuid::new_v4(),
					game_room_id: Uuid::nil(),
					user_id: joined.identity.clone(),
					username: joined.identity.clone(),
					message: pending.text,
					team: joined.team,
					role: Role::User,
					avatar_url: None,
					created_at: now,
					updated_at: now,
					timestamp: now,
				}
			}
		};
		joined.messages.push(message);
		joined.phase = SendPhase::Idle;
		Ok(())
	}

	fn joined(&self) -> Result<&JoinedChat, ChatWidgetError> {
		match &self.state {
			ChatWidgetState::Joined(joined) => Ok(joined),
			ChatWidgetState::NotJoined => Err(ChatWidgetError::NotJoined),
		}
	}
}
