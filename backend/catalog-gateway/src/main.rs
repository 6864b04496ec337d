use actix_web::{web, App, HttpServer};
use anyhow::Context;
use catalog_gateway::{config::Config, rest_api, ServiceClients};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::prelude::*;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_gateway=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true),
        )
        .init();

    info!("Starting catalog gateway...");

    let config = Config::load().context("Failed to load configuration")?;

    let clients = ServiceClients::new(&config.services.catalog_service)
        .context("Invalid CATALOG_GRPC_URL")?;
    info!(endpoint = %config.services.catalog_service, "Service clients initialized");

    let bind_addr = config.bind_addr();
    info!("Catalog gateway starting on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(clients.clone()))
            .configure(rest_api::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {bind_addr}"))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
