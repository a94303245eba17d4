//! Client side of the game chat and voice conference, free of any rendering.

pub mod api;
pub mod chat_widget;
pub mod voice_widget;
