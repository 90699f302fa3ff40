use config::{Config, ConfigError};
use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions};

const DEFAULT_DB_PATH: &str = "list.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Command line flags. Each one overrides the matching `MAILINGLIST_*`
/// environment variable.
#[derive(clap::Parser, Debug, Default)]
#[command(name = "mailinglist", about = "Mailing-list subscriber registry with a JSON API")]
pub struct CliArgs {
    /// SQLite database file (env: MAILINGLIST_DB)
    #[arg(long)]
    pub db: Option<String>,
    /// Address the JSON API binds to (env: MAILINGLIST_BIND_JSON)
    #[arg(long)]
    pub bind_json: Option<String>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub db: String,
    pub bind_json: String,
}

impl Settings {
    /// Bind address usable by `TcpListener`; a bare `:port` listens on every interface.
    pub fn get_address(&self) -> String {
        if self.bind_json.starts_with(':') {
            format!("0.0.0.0{}", self.bind_json)
        } else {
            self.bind_json.clone()
        }
    }

    pub fn get_db_options(&self) -> SqliteConnectOptions {
        let mut db_options = SqliteConnectOptions::new()
            .filename(&self.db)
            .create_if_missing(true);

        db_options.log_statements(tracing::log::LevelFilter::Trace);

        db_options
    }

    pub fn get_db_path(&self) -> String {
        self.db.clone()
    }
}

pub fn get_configuration(args: CliArgs) -> Result<Settings, ConfigError> {
    build_configuration(args, config::Environment::with_prefix("mailinglist"))
}

fn build_configuration(
    args: CliArgs,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    // Precedence, lowest first: defaults, MAILINGLIST_* environment variables, command line.
    // E.g MAILINGLIST_BIND_JSON would set Settings.bind_json
    let settings = Config::builder()
        .set_default("db", DEFAULT_DB_PATH)?
        .set_default("bind_json", DEFAULT_BIND_ADDRESS)?
        .add_source(environment)
        .set_override_option("db", args.db)?
        .set_override_option("bind_json", args.bind_json)?
        .build()?;

    settings.try_deserialize()
}
