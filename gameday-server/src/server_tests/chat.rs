use crate::server::rest_api::models::{
	GameRoomEnvelope, GameRoomResponse, ListMessagesResponse, PostMessageResponse,
};
use crate::server_tests::test_client::TestClient;
use crate::server_tests::{start_test_server, start_unreachable_test_server};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn list_messages(client: &TestClient, game_id: &str, query: &[(&str, &str)]) -> ListMessagesResponse {
	let response = client
		.get(&format!("/api/chat/games/{game_id}/messages"))
		.query(query)
		.send()
		.await
		.expect("Request failed.");
	assert_eq!(StatusCode::OK, response.status());
	response.json().await.expect("Failed to parse message list")
}

async fn post_message(client: &TestClient, game_id: &str, body: Value) -> reqwest::Response {
	client
		.post(&format!("/api/chat/games/{game_id}/messages"))
		.json(&body)
		.send()
		.await
		.expect("Request failed.")
}

#[tokio::test]
async fn should_create_room_on_first_list_and_ignore_later_hints() {
	let client = start_test_server().await;

	let first = list_messages(&client, "g1", &[("awayTeam", "Celtics"), ("homeTeam", "Lakers")]).await;
	let second = list_messages(&client, "g1", &[("awayTeam", "Knicks"), ("homeTeam", "Heat")]).await;

	let first_room = first.game_room.expect("Live response should carry the room");
	let second_room = second.game_room.expect("Live response should carry the room");
	assert_eq!(first_room, second_room);
	assert_eq!("Celtics", second_room.away_team);
	assert_eq!("Lakers", second_room.home_team);
	assert!(!second.fallback);
	assert!(second.messages.is_empty());
}

#[tokio::test]
async fn should_create_room_with_defaults_on_first_post() {
	let client = start_test_server().await;

	let response = post_message(
		&client,
		"fresh-game",
		json!({"message": "hi", "team": "away", "username": "alice"}),
	)
	.await;

	assert_eq!(StatusCode::CREATED, response.status());
	let PostMessageResponse { success, message } = response.json().await.expect("Failed to parse message");
	assert!(success);
	assert!(!message.id.is_nil());
	assert_eq!("alice", message.user_id);
	assert_eq!("alice", message.username);
	assert_eq!("hi", message.message);
	assert_eq!(message.created_at, message.timestamp);
	assert_eq!(
		json!("user"),
		serde_json::to_value(message.role).expect("Failed to serialize role")
	);

	let room = client
		.get("/api/chat/games/fresh-game")
		.send()
		.await
		.expect("Request failed.")
		.json::<GameRoomEnvelope>()
		.await
		.expect("Failed to parse room")
		.game_room;
	assert_eq!(room.id, message.game_room_id);
	assert_eq!("Away Team", room.away_team);
	assert_eq!("Home Team", room.home_team);
	assert!(room.is_active);
}

#[tokio::test]
async fn should_list_all_posted_messages_in_order() {
	let client = start_test_server().await;

	const COUNT: usize = 12;
	for index in 0..COUNT {
		let team = if index % 2 == 0 { "away" } else { "home" };
		let response = post_message(
			&client,
			"g1",
			json!({"message": format!("message {index}"), "team": team, "username": "fan"}),
		)
		.await;
		assert_eq!(StatusCode::CREATED, response.status());
	}

	let history = list_messages(&client, "g1", &[]).await;

	assert_eq!(COUNT, history.messages.len());
	assert!(
		history
			.messages
			.windows(2)
			.all(|pair| pair[0].created_at <= pair[1].created_at)
	);
	assert_eq!("message 0", history.messages[0].message);
	assert_eq!(format!("message {}", COUNT - 1), history.messages[COUNT - 1].message);
}

#[tokio::test]
async fn should_reject_invalid_team() {
	let client = start_test_server().await;

	let response = post_message(
		&client,
		"g1",
		json!({"message": "hi", "team": "visitors", "username": "alice"}),
	)
	.await;

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
	let body = response.json::<Value>().await.expect("Failed to parse error");
	assert_eq!(json!(false), body["success"]);
	assert_eq!(json!("invalid-team"), body["type"]);
	assert_eq!(json!(400), body["status"]);
	assert!(list_messages(&client, "g1", &[]).await.messages.is_empty());
}

#[tokio::test]
async fn should_reject_missing_fields() {
	let client = start_test_server().await;

	let response = post_message(&client, "g1", json!({"message": "hi"})).await;

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
	let body = response.json::<Value>().await.expect("Failed to parse error");
	assert_eq!(json!("validation-error"), body["type"]);
	let error = body["error"].as_str().expect("Error message should be a string");
	assert!(error.contains("team"));
	assert!(error.contains("username"));
}

#[tokio::test]
async fn should_reject_malformed_json() {
	let client = start_test_server().await;

	let response = client
		.post("/api/chat/games/g1/messages")
		.header("Content-Type", "application/json")
		.body("{not json")
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
	let body = response.json::<Value>().await.expect("Failed to parse error");
	assert_eq!(json!("invalid-request-body"), body["type"]);
}

#[tokio::test]
async fn should_conflict_when_creating_room_twice() {
	let client = start_test_server().await;

	let created = client
		.post("/api/chat/games/g1")
		.json(&json!({"awayTeam": "Celtics", "homeTeam": "Lakers"}))
		.send()
		.await
		.expect("Request failed.");
	assert_eq!(StatusCode::CREATED, created.status());
	let created = created
		.json::<GameRoomEnvelope>()
		.await
		.expect("Failed to parse room")
		.game_room;

	let conflict = client
		.post("/api/chat/games/g1")
		.json(&json!({"awayTeam": "Knicks", "homeTeam": "Heat"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::CONFLICT, conflict.status());
	let body = conflict.json::<Value>().await.expect("Failed to parse error");
	let existing: GameRoomResponse =
		serde_json::from_value(body["gameRoom"].clone()).expect("Conflict should carry the existing room");
	assert_eq!(created, existing);
}

#[tokio::test]
async fn should_require_team_names_when_creating_room() {
	let client = start_test_server().await;

	let response = client
		.post("/api/chat/games/g1")
		.json(&json!({"awayTeam": "Celtics"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn should_not_find_unknown_room() {
	let client = start_test_server().await;

	let response = client
		.get("/api/chat/games/unknown")
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::NOT_FOUND, response.status());
	let body = response.json::<Value>().await.expect("Failed to parse error");
	assert_eq!(json!("room-not-found"), body["type"]);
}

#[tokio::test]
async fn should_serve_demo_conversation_when_store_is_unreachable() {
	let client = start_unreachable_test_server().await;

	let history = list_messages(&client, "g1", &[]).await;

	assert!(history.success);
	assert!(history.fallback);
	assert_eq!(None, history.game_room);
	assert_eq!(3, history.messages.len());
}

#[tokio::test]
async fn should_fail_post_when_store_is_unreachable() {
	let client = start_unreachable_test_server().await;

	let response = post_message(
		&client,
		"g1",
		json!({"message": "hi", "team": "home", "username": "bob"}),
	)
	.await;

	assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
}
