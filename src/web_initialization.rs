use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use moviefinder_common::environment::{
    get_env_var_or, parse_env_var_or,
    variables::{WEB_HOST, WEB_PORT},
};
use moviefinder_movies_api::{movies_config, MovieFinderRootSpan};
use moviefinder_provider::ImdbApiClient;
use moviefinder_resolver::MovieResolver;
use tracing_actix_web::TracingLogger;

const WEB_HOST_DEFAULT: &str = "127.0.0.1";
const WEB_PORT_DEFAULT: u16 = 8080;

/// Bind the HTTP server. The returned [Server] runs until it is stopped by a shutdown signal.
pub fn initialize_web_server(resolver: MovieResolver<ImdbApiClient>) -> Result<Server> {
    let resolver = web::Data::new(resolver);
    let host = get_env_var_or(WEB_HOST, WEB_HOST_DEFAULT);
    let port = get_port()?;
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<MovieFinderRootSpan>::new())
            .app_data(resolver.clone())
            .configure(movies_config::<ImdbApiClient>)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind to {}:{}.", host, port))?
    .run();

    Ok(http_server)
}

fn get_port() -> Result<u16> {
    parse_env_var_or(WEB_PORT, WEB_PORT_DEFAULT)
}
