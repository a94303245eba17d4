use crate::chat::{ChatHistory, ChatService, PostMessage};
use crate::context::ApplicationContext;
use crate::room::model::TeamHints;
use crate::server::rest_api::error::ApiErrorResponse;
use crate::server::rest_api::extract::ApiJson;
use crate::server::rest_api::models::{
	ChatMessageResponse, CreateRoomRequest, GameRoomEnvelope, GameRoomResponse, ListMessagesResponse,
	PostMessageRequest, PostMessageResponse, TeamHintsQuery,
};
use crate::server::rest_api::response::Created;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<ApplicationContext> {
	Router::new()
		.route("/games/{game_id}/messages", get(list_messages).post(post_message))
		.route("/games/{game_id}", get(get_room).post(create_room))
}

async fn list_messages(
	State(chat): State<ChatService>,
	Path(game_id): Path<String>,
	Query(hints): Query<TeamHintsQuery>,
) -> Result<Json<ListMessagesResponse>, ApiErrorResponse> {
	let response = match chat.list_messages(&game_id, hints.into()).await? {
		ChatHistory::Live { room, messages } => ListMessagesResponse {
			success: true,
			messages: messages.into_iter().map(ChatMessageResponse::from).collect(),
			game_room: Some(GameRoomResponse::from(room)),
			fallback: false,
		},
		ChatHistory::Degraded { messages, cause: _ } => ListMessagesResponse {
			success: true,
			messages: messages.into_iter().map(ChatMessageResponse::from).collect(),
			game_room: None,
			fallback: true,
		},
	};

	Ok(Json(response))
}

async fn post_message(
	State(chat): State<ChatService>,
	Path(game_id): Path<String>,
	ApiJson(request): ApiJson<PostMessageRequest>,
) -> Result<Created<Json<PostMessageResponse>>, ApiErrorResponse> {
	let PostMessageRequest {
		message,
		team,
		username,
		away_team,
		home_team,
		avatar_url,
	} = request;
	let message = chat
		.post_message(PostMessage {
			game_id,
			message,
			team,
			username,
			avatar_url,
			hints: TeamHints::new(away_team, home_team),
		})
		.await?;

	Ok(Created(Json(PostMessageResponse {
		success: true,
		message: message.into(),
	})))
}

async fn get_room(
	State(chat): State<ChatService>,
	Path(game_id): Path<String>,
) -> Result<Json<GameRoomEnvelope>, ApiErrorResponse> {
	let room = chat.get_room(&game_id).await?;

	Ok(Json(GameRoomEnvelope {
		success: true,
		game_room: room.into(),
	}))
}

async fn create_room(
	State(chat): State<ChatService>,
	Path(game_id): Path<String>,
	ApiJson(CreateRoomRequest { away_team, home_team }): ApiJson<CreateRoomRequest>,
) -> Result<Created<Json<GameRoomEnvelope>>, ApiErrorResponse> {
	let room = chat.create_room(&game_id, away_team, home_team).await?;

	Ok(Created(Json(GameRoomEnvelope {
		success: true,
		game_room: room.into(),
	})))
}
