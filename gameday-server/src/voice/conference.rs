use crate::voice::twiml::{Conference, Twiml};
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_CONFERENCE_NAME: &str = "default-room";
pub const CONFERENCE_STATUS_PATH: &str = "/api/voice/conference-status";
pub const HOLD_MUSIC_URL: &str = "http://twimlets.com/holdmusic?Bucket=com.twilio.music.classical";
const CONFERENCE_PREFIX: &str = "conference:";
const STATUS_CALLBACK_EVENTS: &str = "start end join leave mute hold";
const MAX_PARTICIPANTS: &str = "20";
const APOLOGY: &str = "Sorry, we could not connect your call. Please try again later.";

/// Form body of the provider's inbound call webhook.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct InboundCall {
	pub to: String,
	pub from: String,
	pub call_sid: String,
}

/// Form body of the provider's conference status callback.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConferenceStatus {
	pub conference_sid: Option<String>,
	pub status_callback_event: Option<String>,
	pub friendly_name: Option<String>,
	pub participant_label: Option<String>,
	pub participant_sid: Option<String>,
	pub call_sid: Option<String>,
	pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConferenceEvent {
	Start,
	End,
	Join,
	Leave,
	Mute,
	Unmute,
	Hold,
	Unhold,
	Other(String),
}

impl From<&str> for ConferenceEvent {
	fn from(name: &str) -> Self {
		use ConferenceEvent::*;
		match name {
			"conference-start" => Start,
			"conference-end" => End,
			"participant-join" => Join,
			"participant-leave" => Leave,
			"participant-mute" => Mute,
			"participant-unmute" => Unmute,
			"participant-hold" => Hold,
			"participant-unhold" => Unhold,
			other => Other(other.to_owned()),
		}
	}
}

impl Display for ConferenceEvent {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		use ConferenceEvent::*;
		let name = match self {
			Start => "conference-start",
			End => "conference-end",
			Join => "participant-join",
			Leave => "participant-leave",
			Mute => "participant-mute",
			Unmute => "participant-unmute",
			Hold => "participant-hold",
			Unhold => "participant-unhold",
			Other(name) => name,
		};
		formatter.write_str(name)
	}
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BridgeError {
	#[error("Neither a public base URL is configured nor did the request carry a Host header.")]
	UnknownPublicAddress,
}

/// Conference named by a `conference:<name>` destination, [`DEFAULT_CONFERENCE_NAME`] otherwise.
pub fn conference_name(to: &str) -> &str {
	to.trim()
		.strip_prefix(CONFERENCE_PREFIX)
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.unwrap_or(DEFAULT_CONFERENCE_NAME)
}

#[derive(Clone, Debug, Default)]
pub struct ConferenceBridge {
	public_base_url: Option<String>,
}

impl ConferenceBridge {
	pub fn new(public_base_url: Option<String>) -> Self {
		let public_base_url = public_base_url
			.map(|url| url.trim().trim_end_matches('/').to_owned())
			.filter(|url| !url.is_empty());
		Self { public_base_url }
	}

	/// Routes a call into its conference. Never fails, errors turn into a spoken apology.
	pub fn handle_inbound_call(&self, call: &InboundCall, host: Option<&str>) -> Twiml {
		let conference = conference_name(&call.to);
		match self.status_callback_url(host) {
			Ok(status_callback) => {
				info!(
					%conference,
					from = %call.from,
					call_sid = %call.call_sid,
					"Routing inbound call into conference."
				);
				Twiml::default().dial_conference(
					Conference::new(conference)
						.attribute("waitUrl", HOLD_MUSIC_URL)
						.attribute("statusCallback", status_callback)
						.attribute("statusCallbackEvent", STATUS_CALLBACK_EVENTS)
						.attribute("record", "do-not-record")
						.attribute("trim", "trim-silence")
						.attribute("maxParticipants", MAX_PARTICIPANTS)
						.attribute("startConferenceOnEnter", "true")
						.attribute("endConferenceOnExit", "false"),
				)
			}
			Err(error) => {
				error!(%conference, call_sid = %call.call_sid, %error, "Failed to route inbound call.");
				Self::apology()
			}
		}
	}

	/// Answer for calls that can't be routed.
	pub fn apology() -> Twiml {
		Twiml::default().say(APOLOGY).hangup()
	}

	pub fn handle_conference_status(&self, status: &ConferenceStatus) -> ConferenceEvent {
		let event = ConferenceEvent::from(status.status_callback_event.as_deref().unwrap_or_default());
		info!(
			%event,
			conference_sid = status.conference_sid.as_deref().unwrap_or_default(),
			friendly_name = status.friendly_name.as_deref().unwrap_or_default(),
			participant_label = status.participant_label.as_deref().unwrap_or_default(),
			participant_sid = status.participant_sid.as_deref().unwrap_or_default(),
			call_sid = status.call_sid.as_deref().unwrap_or_default(),
			timestamp = status.timestamp.as_deref().unwrap_or_default(),
			"Conference status event."
		);
		event
	}

	fn status_callback_url(&self, host: Option<&str>) -> Result<String, BridgeError> {
		let base_url = match (&self.public_base_url, host.map(str::trim)) {
			(Some(public_base_url), _) => public_base_url.clone(),
			(None, Some(host)) if !host.is_empty() => format!("https://{host}"),
			_ => return Err(BridgeError::UnknownPublicAddress),
		};
		Ok(format!("{base_url}{CONFERENCE_STATUS_PATH}"))
	}
}
