use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::fs::read_to_string;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Configuration {
	#[serde(with = "socket_addr_deserializer")]
	pub address: SocketAddr,
	pub log_filters: String,
	pub database_url: String,
	pub frontend_url: String,
	#[serde(default)]
	pub public_base_url: Option<String>,
	#[serde(default)]
	pub twilio: TwilioConfiguration,
}

#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TwilioConfiguration {
	pub account_sid: Option<String>,
	pub api_key: Option<String>,
	pub api_secret: Option<String>,
	pub twiml_app_sid: Option<String>,
}

impl Debug for TwilioConfiguration {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		formatter
			.debug_struct("TwilioConfiguration")
			.field("account_sid", &self.account_sid)
			.field("api_key", &self.api_key)
			.field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
			.field("twiml_app_sid", &self.twiml_app_sid)
			.finish()
	}
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;

		Ok(Configuration::try_from(text.as_str())?)
	}

	/// Overrides file values with the process environment.
	pub fn with_environment(self) -> Result<Configuration, ConfigurationError> {
		self.apply_environment(|name| std::env::var(name).ok())
	}

	pub fn apply_environment(
		mut self,
		lookup: impl Fn(&str) -> Option<String>,
	) -> Result<Configuration, ConfigurationError> {
		if let Some(database_url) = lookup("DATABASE_URL") {
			self.database_url = database_url;
		}
		if let Some(frontend_url) = lookup("FRONTEND_URL") {
			self.frontend_url = frontend_url;
		}
		if let Some(port) = lookup("PORT") {
			let port = port
				.trim()
				.parse::<u16>()
				.map_err(|_| ConfigurationError::InvalidEnvironmentVariable { name: "PORT", value: port })?;
			self.address.set_port(port);
		}
		if let Some(public_base_url) = lookup("PUBLIC_BASE_URL") {
			self.public_base_url = Some(public_base_url);
		}

		let twilio = &mut self.twilio;
		for (name, field) in [
			("TWILIO_ACCOUNT_SID", &mut twilio.account_sid),
			("TWILIO_API_KEY", &mut twilio.api_key),
			("TWILIO_API_SECRET", &mut twilio.api_secret),
			("TWILIO_TWIML_APP_SID", &mut twilio.twiml_app_sid),
		] {
			if let Some(value) = lookup(name) {
				*field = Some(value);
			}
		}

		Ok(self)
	}
}

impl TryFrom<&str> for Configuration {
	type Error = toml::de::Error;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		toml::from_str(text)
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
	#[error("Environment variable {name} has invalid value '{value}'")]
	InvalidEnvironmentVariable { name: &'static str, value: String },
}

// See https://serde.rs/custom-date-format.html
mod socket_addr_deserializer {
	use serde::{self, Deserialize, Deserializer};
	use std::net::SocketAddr;
	use std::str::FromStr;

	pub fn deserialize<'deserializer, D>(deserializer: D) -> Result<SocketAddr, D::Error>
	where
		D: Deserializer<'deserializer>,
	{
		let string = String::deserialize(deserializer)?;
		SocketAddr::from_str(string.as_str()).map_err(serde::de::Error::custom)
	}
}
