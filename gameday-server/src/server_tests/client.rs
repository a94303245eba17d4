use crate::chat::model::Team;
use crate::client::api::{ChatApi, ClientError, HttpClient, VoiceTokenSource};
use crate::server::rest_api::models::PostMessageRequest;
use crate::client::chat_widget::{ChatWidget, ChatWidgetState};
use crate::room::model::TeamHints;
use crate::server_tests::{start_test_server, start_unreachable_test_server};
use crate::utils::time_source::TimeSource;

#[tokio::test]
async fn chat_widget_round_trips_through_server() {
	let server = start_test_server().await;
	let hints = TeamHints::new(Some("Celtics".to_owned()), Some("Lakers".to_owned()));
	let mut widget = ChatWidget::new(HttpClient::new(server.base_url()), "g1", hints, TimeSource::default());

	widget.join(Team::Home, "bob").await.expect("Failed to join");
	widget.send("Let's go!").await.expect("Failed to send");

	let ChatWidgetState::Joined(joined) = widget.state() else {
		panic!("Widget should have joined");
	};
	assert!(!joined.offline);
	assert_eq!(1, joined.messages.len());

	let history = HttpClient::new(server.base_url())
		.list_messages("g1", &TeamHints::default())
		.await
		.expect("Failed to list messages");
	assert_eq!(joined.messages, history.messages);
	assert_eq!(Some("Celtics"), history.game_room.as_ref().map(|room| room.away_team.as_str()));
}

#[tokio::test]
async fn chat_widget_goes_offline_when_server_degrades() {
	let server = start_unreachable_test_server().await;
	let mut widget = ChatWidget::new(
		HttpClient::new(server.base_url()),
		"g1",
		TeamHints::default(),
		TimeSource::default(),
	);

	widget.join(Team::Away, "alice").await.expect("Failed to join");
	widget.send("anyone?").await.expect("Failure is absorbed");

	let ChatWidgetState::Joined(joined) = widget.state() else {
		panic!("Widget should have joined");
	};
	assert!(joined.offline);
	assert_eq!(4, joined.messages.len());
	assert_eq!("anyone?", joined.messages[3].message);
}

#[tokio::test]
async fn http_client_fetches_voice_tokens() {
	let server = start_test_server().await;

	let token = HttpClient::new(server.base_url())
		.fetch_token("alice", "lobby")
		.await
		.expect("Failed to fetch token");

	assert_eq!("conference:lobby", token.conference);
}

#[tokio::test]
async fn http_client_surfaces_rejections() {
	let server = start_test_server().await;

	let error = HttpClient::new(server.base_url())
		.fetch_token(" ", "lobby")
		.await
		.expect_err("Blank identity should be rejected");

	assert!(error.to_string().contains("400"), "got: {error}");
}

#[tokio::test]
async fn http_client_encodes_reserved_characters_in_game_ids() {
	let server = start_test_server().await;
	let client = HttpClient::new(server.base_url());

	for game_id in ["nba/42", "g?x=1", "g#1"] {
		let request = PostMessageRequest {
			message: Some(format!("hello {game_id}")),
			team: Some("home".to_owned()),
			username: Some("bob".to_owned()),
			..PostMessageRequest::default()
		};
		let posted = client
			.post_message(game_id, &request)
			.await
			.unwrap_or_else(|error| panic!("Failed to post to '{game_id}': {error}"));

		let history = client
			.list_messages(game_id, &TeamHints::default())
			.await
			.unwrap_or_else(|error| panic!("Failed to list '{game_id}': {error}"));
		let room = history.game_room.expect("Live response should carry the room");
		assert_eq!(game_id, room.game_id);
		assert_eq!(vec![posted], history.messages);
	}
}

#[tokio::test]
async fn http_client_rejects_unusable_base_urls() {
	let error = HttpClient::new("not a url")
		.list_messages("g1", &TeamHints::default())
		.await
		.expect_err("Unparseable base URL should fail");
	assert!(matches!(error, ClientError::InvalidBaseUrl { .. }), "got: {error}");

	let error = HttpClient::new("mailto:fan@example.com")
		.fetch_token("alice", "lobby")
		.await
		.expect_err("Cannot-be-a-base URL should fail");
	assert!(matches!(error, ClientError::InvalidBaseUrl { .. }), "got: {error}");
}
