use crate::configuration::TwilioConfiguration;
use crate::types::date_time::DateTime;
use crate::utils::time_source::TimeSource;
use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const TOKEN_TIME_TO_LIVE_SECONDS: i64 = 3600;
const TWILIO_CONTENT_TYPE: &str = "twilio-fpa;v=1";

#[derive(Error, Debug)]
pub enum VoiceError {
	#[error("Identity is required.")]
	MissingIdentity,
	#[error("Room name is required.")]
	MissingRoomName,
	#[error("Twilio credentials are not configured.")]
	NotConfigured(MissingCredentials),
	#[error("Failed to sign access token: {0}")]
	Signing(#[from] jsonwebtoken::errors::Error),
}

/// Flags every credential that is absent from the configuration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissingCredentials {
	pub account_sid: bool,
	pub api_key: bool,
	pub api_secret: bool,
	pub twiml_app_sid: bool,
}

struct TwilioCredentials<'configuration> {
	account_sid: &'configuration str,
	api_key: &'configuration str,
	api_secret: &'configuration str,
	twiml_app_sid: &'configuration str,
}

impl<'configuration> TryFrom<&'configuration TwilioConfiguration> for TwilioCredentials<'configuration> {
	type Error = MissingCredentials;

	fn try_from(configuration: &'configuration TwilioConfiguration) -> Result<Self, Self::Error> {
		fn present(value: Option<&String>) -> Option<&str> {
			value.map(|value| value.trim()).filter(|value| !value.is_empty())
		}

		let account_sid = present(configuration.account_sid.as_ref());
		let api_key = present(configuration.api_key.as_ref());
		let api_secret = present(configuration.api_secret.as_ref());
		let twiml_app_sid = present(configuration.twiml_app_sid.as_ref());

		match (account_sid, api_key, api_secret, twiml_app_sid) {
			(Some(account_sid), Some(api_key), Some(api_secret), Some(twiml_app_sid)) => Ok(Self {
				account_sid,
				api_key,
				api_secret,
				twiml_app_sid,
			}),
			_ => Err(MissingCredentials {
				account_sid: account_sid.is_none(),
				api_key: api_key.is_none(),
				api_secret: api_secret.is_none(),
				twiml_app_sid: twiml_app_sid.is_none(),
			}),
		}
	}
}

/// Claims of a Twilio access token, see <https://www.twilio.com/docs/iam/access-tokens>
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AccessTokenClaims {
	pub jti: String,
	pub iss: String,
	pub sub: String,
	pub iat: i64,
	pub exp: i64,
	pub grants: Grants,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Grants {
	pub identity: String,
	pub voice: VoiceGrant,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoiceGrant {
	pub incoming: IncomingGrant,
	pub outgoing: OutgoingGrant,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncomingGrant {
	pub allow: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OutgoingGrant {
	pub application_sid: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceToken {
	pub token: String,
	pub identity: String,
	pub room_name: String,
	pub conference: String,
	pub expires_at: DateTime,
}

pub fn conference_address(room_name: &str) -> String {
	format!("conference:{room_name}")
}

#[derive(Clone)]
pub struct VoiceTokenService {
	configuration: TwilioConfiguration,
	time_source: TimeSource,
}

impl VoiceTokenService {
	pub fn new(configuration: TwilioConfiguration, time_source: TimeSource) -> Self {
		Self {
			configuration,
			time_source,
		}
	}

	/// Room name for callers that don't ask for a specific one.
	pub fn default_room_name(&self) -> String {
		format!("room-{}", self.time_source.now().timestamp_millis())
	}

	/// Mints a fresh token on every call, nothing is cached.
	pub fn issue_token(&self, identity: &str, room_name: &str) -> Result<VoiceToken, VoiceError> {
		let identity = identity.trim();
		if identity.is_empty() {
			return Err(VoiceError::MissingIdentity);
		}
		let room_name = room_name.trim();
		if room_name.is_empty() {
			return Err(VoiceError::MissingRoomName);
		}
		let credentials = TwilioCredentials::try_from(&self.configuration).map_err(VoiceError::NotConfigured)?;

		let issued_at = self.time_source.now();
		let expires_at = DateTime::from_chrono(*issued_at + TimeDelta::seconds(TOKEN_TIME_TO_LIVE_SECONDS));
		let iat = issued_at.timestamp();
		let claims = AccessTokenClaims {
			jti: format!("{}-{iat}", credentials.api_key),
			iss: credentials.api_key.to_owned(),
			sub: credentials.account_sid.to_owned(),
			iat,
			exp: iat + TOKEN_TIME_TO_LIVE_SECONDS,
			grants: Grants {
				identity: identity.to_owned(),
				voice: VoiceGrant {
					incoming: IncomingGrant { allow: true },
					outgoing: OutgoingGrant {
						application_sid: credentials.twiml_app_sid.to_owned(),
					},
				},
			},
		};

		let mut header = Header::new(Algorithm::HS256);
		header.cty = Some(TWILIO_CONTENT_TYPE.to_owned());
		let token = jsonwebtoken::encode(
			&header,
			&claims,
			&EncodingKey::from_secret(credentials.api_secret.as_bytes()),
		)?;

		let conference = conference_address(room_name);
		info!(%identity, %conference, %expires_at, "Issued voice access token.");

		Ok(VoiceToken {
			token,
			identity: identity.to_owned(),
			room_name: room_name.to_owned(),
			conference,
			expires_at,
		})
	}
}
