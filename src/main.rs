use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studyplan::api::router;
use studyplan::catalog::{
    CatalogClient, CatalogConfig, CourseCache, HttpCatalogClient, NoopCatalogClient,
};
use studyplan::state::AppState;

const CATALOG_CACHE_TTL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "studyplan=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://studyplan.db".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let catalog: Arc<dyn CatalogClient> = match CatalogConfig::new_from_env() {
        Ok(config) => Arc::new(HttpCatalogClient::new(config)?),
        Err(err) => {
            warn!("catalog client disabled, serving an empty catalog: {}", err);
            Arc::new(NoopCatalogClient)
        }
    };

    let state = AppState {
        db: pool.clone(),
        catalog,
        courses: Arc::new(CourseCache::new(CATALOG_CACHE_TTL)),
    };

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
