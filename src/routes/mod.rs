use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod dashboard;
pub mod doc;
pub mod health;
pub mod page;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/dashboard", dashboard::router())
}

/// Every route the service exposes, bound to `state`. Middleware is layered on in `main`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::dashboard_page))
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = uri.path(), "no route");
    AppError::NotFound
}
