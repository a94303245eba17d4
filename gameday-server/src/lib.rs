pub mod chat;
pub mod client;
pub mod commandline;
pub mod configuration;
pub mod context;
pub mod database;
pub mod error;
pub mod room;
pub mod server;
pub mod types;
pub mod utils;
pub mod voice;
