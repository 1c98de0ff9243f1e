use actix_web::{App, HttpServer};
use anyhow::Context;
use pajak::config::{database, Config};
use pajak::middleware::RequestId;
use pajak::modules::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // JSON lines in production, human-readable otherwise
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pajak={},actix_web=info", config.app.log_level).into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting Pajak tax service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    database::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database ready at {} ({} connections)",
        config.database.url,
        config.database.max_connections
    );

    let state = AppState::new(pool, &config);
    let settings = state.settings.seed().await.context("Failed to seed settings")?;
    tracing::info!(
        company = %settings.company_name,
        ppn_rate = %settings.ppn_rate,
        "Settings loaded"
    );

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(RequestId)
            .configure(move |cfg| state.register(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
