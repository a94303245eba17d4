use crate::configuration::TwilioConfiguration;
use crate::database::sqlite::test_utils;
use crate::server::rest_api::models::VoiceTokenResponse;
use crate::server_tests::{start_test_server, start_test_server_with, test_configuration};
use crate::types::date_time::DateTime;
use crate::utils::time_source::TimeSource;
use chrono::TimeDelta;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};

#[tokio::test]
async fn should_issue_token_expiring_after_one_hour() {
	let now = DateTime::now();
	let client = start_test_server_with(test_configuration(), test_utils::database().await, TimeSource::test(now)).await;

	let response = client
		.post("/api/voice/access-token")
		.json(&json!({"identity": "alice", "roomName": "lobby"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::OK, response.status());
	let token = response
		.json::<VoiceTokenResponse>()
		.await
		.expect("Failed to parse token");
	assert!(token.success);
	assert_eq!("alice", token.identity);
	assert_eq!("lobby", token.room_name);
	assert_eq!("conference:lobby", token.conference);
	assert!(!token.token.is_empty());
	assert_eq!(TimeDelta::seconds(3600), *token.expires_at - *now);
}

#[tokio::test]
async fn should_default_room_name() {
	let client = start_test_server().await;

	let token = client
		.post("/api/voice/access-token")
		.json(&json!({"identity": "alice"}))
		.send()
		.await
		.expect("Request failed.")
		.json::<VoiceTokenResponse>()
		.await
		.expect("Failed to parse token");

	assert!(token.room_name.starts_with("room-"));
	assert_eq!(format!("conference:{}", token.room_name), token.conference);
}

#[tokio::test]
async fn should_require_identity() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/access-token")
		.json(&json!({"roomName": "lobby"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn should_require_room_name_when_joining_conference() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/conference/join")
		.json(&json!({"identity": "alice"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn should_issue_token_when_joining_conference() {
	let client = start_test_server().await;

	let token = client
		.post("/api/voice/conference/join")
		.json(&json!({"identity": "bob", "roomName": "game-42"}))
		.send()
		.await
		.expect("Request failed.")
		.json::<VoiceTokenResponse>()
		.await
		.expect("Failed to parse token");

	assert_eq!("bob", token.identity);
	assert_eq!("conference:game-42", token.conference);
}

#[tokio::test]
async fn should_flag_exactly_the_missing_credential() {
	let configuration = test_configuration();
	let configuration = crate::configuration::Configuration {
		twilio: TwilioConfiguration {
			api_key: None,
			..configuration.twilio.clone()
		},
		..configuration
	};
	let client = start_test_server_with(configuration, test_utils::database().await, TimeSource::default()).await;

	let response = client
		.post("/api/voice/access-token")
		.json(&json!({"identity": "alice", "roomName": "lobby"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
	let body = response.json::<Value>().await.expect("Failed to parse error");
	assert_eq!(json!(false), body["success"]);
	assert_eq!(
		json!({"accountSid": false, "apiKey": true, "apiSecret": false, "twimlAppSid": false}),
		body["missing"]
	);
}

#[tokio::test]
async fn should_route_inbound_call_into_conference() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/voice")
		.form(&[("To", "conference:lobby"), ("From", "client:alice"), ("CallSid", "CA123")])
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::OK, response.status());
	assert_eq!(
		Some("text/xml"),
		response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
	);
	let twiml = response.text().await.expect("Failed to read TwiML");
	assert!(twiml.contains(">lobby</Conference>"), "got: {twiml}");
	assert!(twiml.contains(r#"statusCallback="https://gameday.example/api/voice/conference-status""#));
	assert!(twiml.contains(r#"maxParticipants="20""#));
	assert!(twiml.contains(r#"endConferenceOnExit="false""#));
}

#[tokio::test]
async fn should_use_default_conference_for_plain_numbers() {
	let client = start_test_server().await;

	let twiml = client
		.post("/api/voice/voice")
		.form(&[("To", "+15551234567"), ("From", "+15557654321"), ("CallSid", "CA123")])
		.send()
		.await
		.expect("Request failed.")
		.text()
		.await
		.expect("Failed to read TwiML");

	assert!(twiml.contains(">default-room</Conference>"), "got: {twiml}");
}

#[tokio::test]
async fn should_apologize_for_malformed_inbound_call() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/voice")
		.json(&json!({"To": "conference:lobby"}))
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::OK, response.status());
	let twiml = response.text().await.expect("Failed to read TwiML");
	assert!(twiml.contains("<Say>"), "got: {twiml}");
	assert!(twiml.contains("<Hangup/>"), "got: {twiml}");
}

#[tokio::test]
async fn should_acknowledge_conference_status() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/conference-status")
		.form(&[
			("ConferenceSid", "CF123"),
			("StatusCallbackEvent", "participant-join"),
			("FriendlyName", "lobby"),
			("CallSid", "CA123"),
		])
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::OK, response.status());
}

#[tokio::test]
async fn should_acknowledge_malformed_conference_status() {
	let client = start_test_server().await;

	let response = client
		.post("/api/voice/conference-status")
		.body("not a form")
		.send()
		.await
		.expect("Request failed.");

	assert_eq!(StatusCode::OK, response.status());
}
