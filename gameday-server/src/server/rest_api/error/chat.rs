use crate::chat::ChatError;
use crate::server::rest_api::error::ApiErrorResponse;
use crate::server::rest_api::models::GameRoomResponse;
use axum::http::StatusCode;
use tracing::error;

impl From<ChatError> for ApiErrorResponse {
	fn from(chat_error: ChatError) -> Self {
		use ChatError::*;
		match chat_error {
			MissingFields(_) => ApiErrorResponse::new("validation-error", StatusCode::BAD_REQUEST, chat_error.to_string()),
			InvalidTeam(_) => ApiErrorResponse::new("invalid-team", StatusCode::BAD_REQUEST, chat_error.to_string()),
			RoomNotFound => ApiErrorResponse::new("room-not-found", StatusCode::NOT_FOUND, chat_error.to_string()),
			RoomAlreadyExists(room) => ApiErrorResponse::new(
				"room-already-exists",
				StatusCode::CONFLICT,
				"Game room already exists",
			)
			.with_game_room(GameRoomResponse::from(*room)),
			Database(database_error) => {
				error!(error = %database_error, "Chat storage request failed.");
				ApiErrorResponse::new(
					"storage-error",
					StatusCode::INTERNAL_SERVER_ERROR,
					"Chat storage is unavailable.",
				)
			}
		}
	}
}
