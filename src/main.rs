use std::net::SocketAddr;
use std::sync::Arc;

use job_board::{
    config::{get_config, init_config},
    database::{
        pool::{create_pool, run_migrations},
        MemoryStore, PgStore, Store,
    },
    routes,
    services::seed::seed_demo_data,
    telemetry, AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    telemetry::init(config.log_format)?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("using postgres store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data lives in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_demo_data {
        seed_demo_data(store.as_ref()).await?;
    }

    tokio::fs::create_dir_all(&config.media_root).await?;
    info!(media_root = %config.media_root, "serving uploaded media");

    let app = routes::router(AppState::new(store));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
