use clap::Parser;
use gameday_server::commandline::Commandline;
use gameday_server::error::GamedayError;

#[tokio::main]
async fn main() -> Result<(), GamedayError> {
	Commandline::parse().run().await
}
