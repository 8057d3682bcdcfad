use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use matchroom::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use matchroom::telemetry;
use matchroom::{routes, AppState, InMemoryParticipantStore, ServerConfig};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        allowed_channels = config.allowed_channels.len(),
        seeded = config.rng_seed.is_some(),
        "Starting matchroom"
    );

    let store = Arc::new(InMemoryParticipantStore::new());
    let data = web::Data::new(AppState::from_config(&config, store));

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
