mod provider_initialization;
mod web_initialization;

use crate::provider_initialization::initialize_resolver;
use crate::web_initialization::initialize_web_server;
use anyhow::Result;
use dotenv::dotenv;
use moviefinder_common::environment::variables::LOG_FILTER;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    // Set up logging framework, reading filter configuration from the environment variable
    // or defaulting to warning logs and above globally if the filter isn't specified.
    let filter = EnvFilter::try_from_env(LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::WARN.into()));
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    info!("Initializing MovieFinder...");
    let resolver = initialize_resolver()?;

    info!("Starting up web server...");
    let http_server = initialize_web_server(resolver)?;

    info!("MovieFinder started!");
    http_server.await?;

    info!("Shutting MovieFinder down.");
    Ok(())
}
