use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::jwt::{JwtConfig, JwtService};
use api::repositories::{OrderRepository, PerfumeRepository, UserRepository};
use api::routes;
use api::state::AppState;
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting catalog API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    health_check(&pool).await?;
    info!("Database connection successful");

    // Initialize JWT service with the process-wide signing secret
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config);

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let perfume_repository = PerfumeRepository::new(pool.clone());
    let order_repository = OrderRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        user_repository,
        perfume_repository,
        order_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Catalog API service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
