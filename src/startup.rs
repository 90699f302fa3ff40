use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::routes;
use crate::storage::{ensure_schema, StorageError};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

#[derive(thiserror::Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error("Failed to create the emails table: {0}")]
    Schema(#[source] StorageError),
    #[error("Failed to start the JSON API server: {0}")]
    Io(#[from] std::io::Error),
}

impl std::fmt::Debug for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl Application {
    /// Opens the store, makes sure the `emails` table exists and binds the
    /// listener. Any failure here is fatal for the process.
    pub async fn build(config: Settings) -> Result<Self, StartupError> {
        let db_pool = get_connection_db_pool(&config);

        ensure_schema(&db_pool)
            .await
            .map_err(StartupError::Schema)?;

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("JSON API server is listening on {}", config.get_address());

        let server = run(listener, db_pool)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, db_pool: SqlitePool) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);

    let server = HttpServer::new(move || {
        App::new()
            // Request logger for every incoming call
            .wrap(TracingLogger::default())
            .configure(routes::configure)
            .app_data(db_pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &Settings) -> SqlitePool {
    SqlitePoolOptions::new().connect_lazy_with(config.get_db_options())
}
