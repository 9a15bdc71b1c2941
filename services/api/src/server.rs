use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use magang::config::{AppConfig, DatabaseConfig};
use magang::error::AppError;
use magang::intake::{IntakeService, ReviewerPolicy};
use magang::telemetry;

use crate::cli::ServeArgs;
use crate::infra::auth::BearerTokenPolicy;
use crate::infra::notify::OutboundNotifier;
use crate::infra::postgres::PgApplicationStore;
use crate::infra::{seed, AppState};
use crate::routes::with_intake_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let pool = connect(&config.database).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::database)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.reviewer.admin_token.is_none() {
        warn!("ADMIN_API_TOKEN is not set; review endpoints will reject every request");
    }

    let store = Arc::new(PgApplicationStore::new(pool));
    let notifier = Arc::new(OutboundNotifier::from_config(&config.notification));
    let policy: Arc<dyn ReviewerPolicy> =
        Arc::new(BearerTokenPolicy::from_config(&config.reviewer));
    let service = Arc::new(IntakeService::new(store, notifier));

    let app = with_intake_routes(service, policy)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "application intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) async fn seed_positions() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let pool = connect(&config.database).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(AppError::database)?;

    let inserted = seed::seed_positions(&pool)
        .await
        .map_err(AppError::database)?;
    info!(inserted, "position catalog seeded");
    Ok(())
}

async fn connect(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(AppError::database)
}
