use crate::server::rest_api::error::ApiErrorResponse;
use crate::voice::token::VoiceError;
use axum::http::StatusCode;
use tracing::{error, warn};

impl From<VoiceError> for ApiErrorResponse {
	fn from(voice_error: VoiceError) -> Self {
		use VoiceError::*;
		match voice_error {
			MissingIdentity | MissingRoomName => {
				ApiErrorResponse::new("validation-error", StatusCode::BAD_REQUEST, voice_error.to_string())
			}
			NotConfigured(missing) => {
				warn!(?missing, "Voice token requested without complete Twilio credentials.");
				ApiErrorResponse::new(
					"voice-not-configured",
					StatusCode::INTERNAL_SERVER_ERROR,
					voice_error.to_string(),
				)
				.with_missing(missing)
			}
			Signing(signing_error) => {
				error!(error = %signing_error, "Failed to sign voice access token.");
				ApiErrorResponse::new(
					"token-signing-failed",
					StatusCode::INTERNAL_SERVER_ERROR,
					"Failed to generate access token.",
				)
			}
		}
	}
}
