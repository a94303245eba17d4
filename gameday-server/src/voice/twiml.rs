//! Minimal TwiML writer for the verbs the conference bridge answers with.
//!
//! See <https://www.twilio.com/docs/voice/twiml>

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verb {
	Say(String),
	Hangup,
	DialConference(Conference),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conference {
	pub name: String,
	pub attributes: Vec<(&'static str, String)>,
}

impl Conference {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
		}
	}

	#[must_use]
	pub fn attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.attributes.push((name, value.into()));
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Twiml {
	verbs: Vec<Verb>,
}

impl Twiml {
	#[must_use]
	pub fn say(mut self, text: impl Into<String>) -> Self {
		self.verbs.push(Verb::Say(text.into()));
		self
	}

	#[must_use]
	pub fn hangup(mut self) -> Self {
		self.verbs.push(Verb::Hangup);
		self
	}

	#[must_use]
	pub fn dial_conference(mut self, conference: Conference) -> Self {
		self.verbs.push(Verb::DialConference(conference));
		self
	}

	pub fn verbs(&self) -> &[Verb] {
		&self.verbs
	}

	pub fn render(&self) -> String {
		let mut document = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
		for verb in &self.verbs {
			match verb {
				Verb::Say(text) => {
					let _ = write!(document, "<Say>{}</Say>", escape(text));
				}
				Verb::Hangup => document.push_str("<Hangup/>"),
				Verb::DialConference(Conference { name, attributes }) => {
					document.push_str("<Dial><Conference");
					for (attribute, value) in attributes {
						let _ = write!(document, r#" {attribute}="{}""#, escape(value));
					}
					let _ = write!(document, ">{}</Conference></Dial>", escape(name));
				}
			}
		}
		document.push_str("</Response>");
		document
	}
}

impl IntoResponse for Twiml {
	fn into_response(self) -> Response {
		([(CONTENT_TYPE, mime::TEXT_XML.as_ref())], self.render()).into_response()
	}
}

fn escape(text: &str) -> Cow<'_, str> {
	if !text.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 16);
	for character in text.chars() {
		match character {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&apos;"),
			other => escaped.push(other),
		}
	}
	Cow::Owned(escaped)
}
