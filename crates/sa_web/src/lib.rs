use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts)
                .post(handlers::create_post)
                .delete(handlers::clear_posts),
        )
        .route("/api/fetch", post(handlers::fetch_posts))
        .route("/api/state", get(handlers::store_state))
        .route("/api/engagement", get(handlers::engagement))
        .route("/api/keywords", get(handlers::keywords))
        .route("/api/sentiment", get(handlers::sentiment))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/export.csv", get(handlers::export_csv))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> sa_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use sa_core::{Error, Result};
}
