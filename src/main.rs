use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_booking::{config::Config, controllers, database::Database, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Movie Booking API");

    if config.jwt.is_default_secret() {
        warn!("SECRET_KEY is the insecure default, override it in production");
    }

    // Connect to the database
    let db = Database::new(&config.database.url(), config.database.pool_size)
        .await
        .expect("Failed to connect to database");
    info!("Database connected");

    // Run migrations
    db.run_migrations().await.expect("Failed to run migrations");

    // Create the shared application state
    let app_state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    // Create the main router
    let app = Router::new()
        .route("/", get(|| async { "Movie Booking API v1.0" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        // Оригинал включает CORS глобально, повторяем
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.app.host, config.app.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
