use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contact_api::config::Config;
use contact_api::geocoding::GeocodingClient;
use contact_api::handlers::{self, AppState};
use contact_api::store::ContactStore;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection.
/// - The geocoding client.
/// - HTTP routes and middleware (CORS, tracing).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let store = ContactStore::connect(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Initialize geocoding client
    let geocoder = GeocodingClient::new(config.geocoding_base_url.clone());
    tracing::info!("Geocoding client initialized: {}", config.geocoding_base_url);

    // Build application state
    let app_state = Arc::new(AppState { store, geocoder });

    // Build final app with process-level layers
    let app = handlers::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
