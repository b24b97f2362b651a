mod config;
mod database;
mod error;
mod messages;
mod password_hasher;
mod routes;
mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use database::{Database, Store};
use password_hasher::PasswordHasher;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load().map_err(|err| {
        error!(error = %err, "invalid configuration");
        std::io::Error::other(err)
    })?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(start(config))
}

async fn start(config: ServerConfig) -> std::io::Result<()> {
    let server_url = config.socket_addr();

    let database = Database::new(&config.database_url, config.pool_size)
        .map_err(std::io::Error::other)?;
    database.migrate().await.map_err(std::io::Error::other)?;

    let store: Arc<dyn Store> = Arc::new(database);
    let store = web::Data::from(store);
    let hasher = web::Data::new(PasswordHasher::new());

    info!(%server_url, "listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(hasher.clone())
            .configure(routes::configure)
    })
    .bind(server_url)?
    .run()
    .await
}
