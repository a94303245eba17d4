pub mod conference;
pub mod token;
pub mod twiml;
