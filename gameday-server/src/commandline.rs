use crate::configuration::Configuration;
use crate::context::ApplicationContext;
use crate::error::GamedayError;
use crate::server::run_server;
use crate::utils::time_source::TimeSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
pub struct Commandline {
	#[clap(short = 'c', long = "config-file", default_value = "configuration.toml")]
	pub configuration_file_path: String,
	#[clap(subcommand)]
	pub command: Option<BaseCommand>,
}

#[derive(clap::Subcommand, Default)]
pub enum BaseCommand {
	/// Run the gameday server
	#[default]
	Run,
	/// Print the effective configuration, secrets redacted
	Configuration,
}

impl Commandline {
	pub async fn run(self) -> Result<(), GamedayError> {
		let configuration = Configuration::from_file(&self.configuration_file_path)?.with_environment()?;

		let base_command = self.command.unwrap_or_default();
		match base_command {
			BaseCommand::Run => {
				initialize_logging(&configuration.log_filters)?;
				let application_context = ApplicationContext::new(configuration, TimeSource::default()).await?;
				info!(
					address = %application_context.configuration.address,
					frontend_url = %application_context.configuration.frontend_url,
					"Starting server. API available under '/api'."
				);
				run_server(application_context).await?;
			}
			BaseCommand::Configuration => println!("{configuration:#?}"),
		}
		Ok(())
	}
}

fn initialize_logging(log_filters: &str) -> Result<(), GamedayError> {
	let filter = EnvFilter::try_new(log_filters).map_err(|error| GamedayError::Logging(error.to_string()))?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.try_init()
		.map_err(|error| GamedayError::Logging(error.to_string()))
}
