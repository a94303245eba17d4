use crate::configuration::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GamedayError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Failed to initialize logging: {0}")]
	Logging(String),
	#[error(transparent)]
	Startup(#[from] anyhow::Error),
	#[error("IO error while serving requests: {0}")]
	Server(#[from] std::io::Error),
}
