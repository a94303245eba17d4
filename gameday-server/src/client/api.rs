use crate::room::model::TeamHints;
use crate::server::rest_api::models::{
	ChatMessageResponse, ListMessagesResponse, PostMessageRequest, PostMessageResponse, VoiceTokenRequest,
	VoiceTokenResponse,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use static_assertions::assert_obj_safe;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
	#[error("Request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("Server rejected request with status {status}: {message}")]
	Rejected { status: u16, message: String },
	#[error("Invalid base URL '{base_url}': {reason}")]
	InvalidBaseUrl { base_url: String, reason: String },
}

#[async_trait]
pub trait ChatApi: Send + Sync {
	async fn list_messages(&self, game_id: &str, hints: &TeamHints) -> Result<ListMessagesResponse, ClientError>;

	async fn post_message(
		&self,
		game_id: &str,
		request: &PostMessageRequest,
	) -> Result<ChatMessageResponse, ClientError>;
}

assert_obj_safe!(ChatApi);

#[async_trait]
pub trait VoiceTokenSource: Send + Sync {
	async fn fetch_token(&self, identity: &str, room_name: &str) -> Result<VoiceTokenResponse, ClientError>;
}

assert_obj_safe!(VoiceTokenSource);

/// Talks to a running gameday server over HTTP.
#[derive(Clone, Debug)]
pub struct HttpClient {
	client: reqwest::Client,
	base_url: String,
}

impl HttpClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self::with_client(reqwest::Client::new(), base_url)
	}

	pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_owned();
		Self { client, base_url }
	}

	/// Appends each segment to the base URL, percent-encoding reserved characters.
	fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
		let invalid = |reason: String| ClientError::InvalidBaseUrl {
			base_url: self.base_url.clone(),
			reason,
		};
		let mut url = Url::parse(&self.base_url).map_err(|error| invalid(error.to_string()))?;
		url.path_segments_mut()
			.map_err(|()| invalid("cannot be a base".to_owned()))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	fn messages_url(&self, game_id: &str) -> Result<Url, ClientError> {
		self.url(&["api", "chat", "games", game_id, "messages"])
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	error: String,
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
	let response = request.send().await?;
	if response.status().is_success() {
		return Ok(response.json().await?);
	}
	Err(rejection(response).await)
}

async fn rejection(response: Response) -> ClientError {
	let status = response.status();
	let message = match response.json::<ErrorBody>().await {
		Ok(ErrorBody { error }) => error,
		Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_owned(),
	};
	ClientError::Rejected {
		status: status.as_u16(),
		message,
	}
}

#[async_trait]
impl ChatApi for HttpClient {
	async fn list_messages(&self, game_id: &str, hints: &TeamHints) -> Result<ListMessagesResponse, ClientError> {
		let mut query = Vec::new();
		if let Some(away_team) = &hints.away_team {
			query.push(("awayTeam", away_team.as_str()));
		}
		if let Some(home_team) = &hints.home_team {
			query.push(("homeTeam", home_team.as_str()));
		}

		send(
			self.client
				.get(self.messages_url(game_id)?)
				.query(&query),
		)
		.await
	}

	async fn post_message(
		&self,
		game_id: &str,
		request: &PostMessageRequest,
	) -> Result<ChatMessageResponse, ClientError> {
		let response: PostMessageResponse = send(
			self.client
				.post(self.messages_url(game_id)?)
				.json(request),
		)
		.await?;
		Ok(response.message)
	}
}

#[async_trait]
impl VoiceTokenSource for HttpClient {
	async fn fetch_token(&self, identity: &str, room_name: &str) -> Result<VoiceTokenResponse, ClientError> {
		send(
			self.client
				.post(self.url(&["api", "voice", "conference", "join"])?)
				.json(&VoiceTokenRequest {
					identity: Some(identity.to_owned()),
					room_name: Some(room_name.to_owned()),
				}),
		)
		.await
	}
}
