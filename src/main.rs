use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpServer};
use anyhow::Context;
use repayplan::config::{Config, LogFormat};
use repayplan::middleware::{error_response, ErrorHandler, RequestId};
use repayplan::modules::health::KeepAlivePinger;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config);

    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting repayment planner");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    if let Some(keepalive) = &config.keepalive {
        let pinger = Arc::new(KeepAlivePinger::new(keepalive).context("Failed to build keep-alive client")?);
        tokio::spawn(pinger.start());
    }

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let development = config.app.is_development();

    let server = HttpServer::new(move || {
        let cors = match &server_config.cors_allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header()
                .max_age(3600),
            None if development => Cors::permissive(),
            None => Cors::default(),
        };

        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(repayplan::configure_app)
            .default_service(web::to(|| async {
                error_response(StatusCode::NOT_FOUND, "Not found")
            }))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("repayplan={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
