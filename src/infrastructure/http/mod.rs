use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{convert::ConvertController, health, index};
use crate::infrastructure::config::Config;

/// Build the application router
pub fn build_router(convert_controller: Arc<ConvertController>, max_upload_bytes: usize) -> Router {
    let convert_routes = Router::new()
        .route("/convert", post(ConvertController::convert))
        .with_state(convert_controller)
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health))
        .merge(convert_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
