use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use monedas_api::application::ports::id_sequence::IdSequence;
use monedas_api::application::ports::user_repository::UserRepository;
use monedas_api::bootstrap::app_context::{AppContext, AppServices};
use monedas_api::bootstrap::config::{Config, UserStoreBackend};
use monedas_api::bootstrap::router::build_router;
use monedas_api::infrastructure::db::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "monedas_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting monedas API");

    let (user_repo, pool): (Arc<dyn UserRepository>, Option<PgPool>) = match cfg.user_store {
        UserStoreBackend::Postgres => {
            let pool = monedas_api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.database_max_connections,
            )
            .await?;
            monedas_api::infrastructure::db::migrate(&pool).await?;
            let sequence: Arc<dyn IdSequence> = Arc::new(
                monedas_api::infrastructure::db::id_sequence_pg::PgIdSequence::new(pool.clone()),
            );
            let repo: Arc<dyn UserRepository> = Arc::new(
                monedas_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
                    pool.clone(),
                    sequence,
                ),
            );
            (repo, Some(pool))
        }
        UserStoreBackend::Memory => {
            tracing::warn!("user_store_in_memory_data_is_not_persisted");
            let repo: Arc<dyn UserRepository> =
                Arc::new(monedas_api::infrastructure::memory::InMemoryUserRepository::new());
            (repo, None)
        }
    };

    let services = AppServices::new(user_repo);
    let ctx = AppContext::new(cfg.clone(), services);
    let app = build_router(ctx, pool);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown_signal_received");
}
