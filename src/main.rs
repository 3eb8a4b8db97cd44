mod api;
mod app;
mod config;
mod container;
mod domain;
mod infrastructure;
mod services;
mod telemetry;

use config::AppConfig;
use container::Container;
use domain::services::password::HashingError;
use infrastructure::databases::surrealdb;
use services::jsonwebtoken::KeyPair;
use telemetry::TelemetryError;

use actix_web::HttpServer;
use include_dir::{Dir, include_dir};
use std::fs;
use std::sync::Arc;
use surrealdb_migrations::MigrationRunner;
use thiserror::Error;
use tracing::info;

#[cfg(test)]
mod tests;

const MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migration");

#[derive(Error, Debug)]
pub enum BootError {
    #[error(transparent)]
    Database(#[from] ::surrealdb::Error),
    #[error(transparent)]
    Configuration(#[from] figment::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Migration(String),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    JsonWebToken(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("{0}: {1}")]
    ReadKey(String, String),
}

async fn run() -> Result<(), BootError> {
    let config = AppConfig::load()?;

    let provider = telemetry::configure(&config.service, &config.logging)?;

    let conn = surrealdb::connect(&config.surrealdb).await?;

    if config.surrealdb.migration {
        MigrationRunner::new(&conn)
            .load_files(&MIGRATIONS_DIR)
            .up()
            .await
            .map_err(|err| BootError::Migration(err.to_string()))?;
    }

    let private_key = read_key(&config.jsonwebtoken.private_keyfile)?;
    let public_key = read_key(&config.jsonwebtoken.public_keyfile)?;

    let keys = KeyPair::from_rsa_pem(private_key, public_key)?;

    let container = Arc::new(Container::new(conn, keys, &config)?);

    let server = config.server;
    let bind = (server.host.clone(), server.port);

    info!(host = %server.host, port = server.port, "listening");

    HttpServer::new(move || app::create(Arc::clone(&container), &server))
        .bind(bind)?
        .run()
        .await?;

    telemetry::shutdown(provider)?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn read_key(keyfile: &str) -> Result<Vec<u8>, BootError> {
    fs::read(keyfile).map_err(|err| BootError::ReadKey(err.to_string(), keyfile.to_string()))
}
