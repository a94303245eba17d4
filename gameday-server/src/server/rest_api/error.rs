use crate::server::rest_api::models::GameRoomResponse;
use crate::voice::token::MissingCredentials;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

mod chat;
mod voice;

/// Type-erased error response
///
/// NOTE: This type is inspired by RFC7807 (Problem Details for HTTP APIs) but spares on a lot of
/// the details to avoid complexity.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7807.html>
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
	success: bool,
	r#type: &'static str,
	status: u16,
	error: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	missing: Option<MissingCredentials>,
	#[serde(skip_serializing_if = "Option::is_none")]
	game_room: Option<GameRoomResponse>,
}

impl ApiErrorResponse {
	pub fn new(r#type: &'static str, status: StatusCode, error: impl Into<String>) -> Self {
		Self {
			success: false,
			r#type,
			status: status.as_u16(),
			error: error.into(),
			missing: None,
			game_room: None,
		}
	}

	#[must_use]
	pub fn with_missing(mut self, missing: MissingCredentials) -> Self {
		self.missing = Some(missing);
		self
	}

	#[must_use]
	pub fn with_game_room(mut self, game_room: GameRoomResponse) -> Self {
		self.game_room = Some(game_room);
		self
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		let status_code = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status_code, Json(self)).into_response()
	}
}

impl From<JsonRejection> for ApiErrorResponse {
	fn from(rejection: JsonRejection) -> Self {
		ApiErrorResponse::new("invalid-request-body", StatusCode::BAD_REQUEST, rejection.body_text())
	}
}
