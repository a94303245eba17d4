use crate::context::ApplicationContext;
use crate::server::rest_api::error::ApiErrorResponse;
use crate::server::rest_api::extract::ApiJson;
use crate::server::rest_api::models::{VoiceTokenRequest, VoiceTokenResponse};
use crate::voice::conference::{ConferenceBridge, ConferenceStatus, InboundCall};
use crate::voice::token::VoiceTokenService;
use crate::voice::twiml::Twiml;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json, Router};
use tracing::warn;

pub fn routes() -> Router<ApplicationContext> {
	Router::new()
		.route("/access-token", post(access_token))
		.route("/conference/join", post(join_conference))
		.route("/voice", post(inbound_call))
		.route("/conference-status", post(conference_status))
}

async fn access_token(
	State(voice_tokens): State<VoiceTokenService>,
	ApiJson(VoiceTokenRequest { identity, room_name }): ApiJson<VoiceTokenRequest>,
) -> Result<Json<VoiceTokenResponse>, ApiErrorResponse> {
	let room_name = room_name
		.filter(|room_name| !room_name.trim().is_empty())
		.unwrap_or_else(|| voice_tokens.default_room_name());
	let voice_token = voice_tokens.issue_token(identity.as_deref().unwrap_or_default(), &room_name)?;

	Ok(Json(voice_token.into()))
}

async fn join_conference(
	State(voice_tokens): State<VoiceTokenService>,
	ApiJson(VoiceTokenRequest { identity, room_name }): ApiJson<VoiceTokenRequest>,
) -> Result<Json<VoiceTokenResponse>, ApiErrorResponse> {
	let voice_token = voice_tokens.issue_token(
		identity.as_deref().unwrap_or_default(),
		room_name.as_deref().unwrap_or_default(),
	)?;

	Ok(Json(voice_token.into()))
}

async fn inbound_call(
	State(conference): State<ConferenceBridge>,
	headers: HeaderMap,
	call: Result<Form<InboundCall>, FormRejection>,
) -> Twiml {
	let host = headers.get(HOST).and_then(|host| host.to_str().ok());
	match call {
		Ok(Form(call)) => conference.handle_inbound_call(&call, host),
		Err(rejection) => {
			warn!(error = %rejection, "Rejected malformed inbound call webhook.");
			ConferenceBridge::apology()
		}
	}
}

async fn conference_status(
	State(conference): State<ConferenceBridge>,
	status: Result<Form<ConferenceStatus>, FormRejection>,
) -> StatusCode {
	match status {
		Ok(Form(status)) => {
			conference.handle_conference_status(&status);
		}
		Err(rejection) => warn!(error = %rejection, "Ignoring malformed conference status webhook."),
	}
	StatusCode::OK
}
