//! Health HTTP Endpoint
//!
//! Serves a shared [`Health`] aggregator as JSON for scrapers and the
//! `health-get` tool.

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::ServerError;
pub use settings::ServerConfig;

use health::Health;

/// Path of the formatted status document
pub const HEALTH_PATH: &str = "/health";
/// Path of the structured status document
pub const EXPANDED_PATH: &str = "/health/expanded";

/// Create the application router
pub fn create_router(health: Arc<Health>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(routes::status::get_health))
        .route(EXPANDED_PATH, get(routes::status::get_expanded))
        .layer(TraceLayer::new_for_http())
        .with_state(health)
}

/// Initialize logging
pub fn init_logging(level: Level) -> Result<(), ServerError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Bind the configured listen address
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("Health endpoint bound to {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the aggregator on an already bound listener
pub async fn serve(listener: TcpListener, health: Arc<Health>) -> Result<(), ServerError> {
    let app = create_router(health);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging, bind and serve until the listener fails
pub async fn run_server(config: &ServerConfig, health: Arc<Health>) -> Result<(), ServerError> {
    init_logging(config.level()?)?;

    let listener = bind(config).await?;
    info!("Serving {} and {}", HEALTH_PATH, EXPANDED_PATH);

    serve(listener, health).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use health::Reason;

    #[tokio::test]
    async fn test_serve_over_tcp() {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            ..Default::default()
        };
        let listener = bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let health = Arc::new(Health::new());
        health.alert(
            Reason::new("no meaning of life").describe("real", "talk"),
            ["real", "talk"],
        );
        tokio::spawn(serve(listener, Arc::clone(&health)));

        let url = format!("http://{}{}", addr, HEALTH_PATH);
        let body: serde_json::Value = reqwest::get(url.as_str()).await.unwrap().json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": 1, "errors": ["no meaning of life [real=talk]"]})
        );

        health.resolve(["real", "talk"]);
        let body: serde_json::Value = reqwest::get(url.as_str()).await.unwrap().json().await.unwrap();
        assert_eq!(body, serde_json::json!({"status": 0}));
    }
}
