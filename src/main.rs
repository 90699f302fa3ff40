use clap::Parser;

use mailinglist::config::{get_configuration, CliArgs};
use mailinglist::startup::{Application, StartupError};
use mailinglist::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let subscriber = get_subscriber(String::from("mailinglist"), String::from("info"));

    init_subscriber(subscriber);

    let config = get_configuration(CliArgs::parse())?;

    tracing::info!("Server running in db path: {}", config.get_db_path());

    let application = Application::build(config).await?;

    application.run_until_stop().await?;

    Ok(())
}
