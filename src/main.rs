use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use user_service::{
    config::{Config, LogFormat},
    database::{
        pool::{create_pool, run_migrations},
        user_store::PgUserStore,
    },
    routes::build_router,
    utils::shutdown::shutdown_signal,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    config.check_static_index()?;

    let pool = create_pool(&config).await?;
    info!(
        max_connections = config.db_max_connections,
        "database pool ready"
    );

    if config.run_migrations {
        run_migrations(&pool).await?;
        info!("database migrations applied");
    }

    let store = Arc::new(PgUserStore::new(pool.clone()));
    let app_state = AppState::new(store, config.health_timeout);
    let app = build_router(app_state, &config);

    info!("Serving index from: {}", config.static_index.display());
    let listener = TcpListener::bind(config.server_address).await?;
    info!("Server listening on {}", config.server_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("user_service=info,tower_http=info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
