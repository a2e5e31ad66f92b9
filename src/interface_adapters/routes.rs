use crate::interface_adapters::handlers::entries::notion_entries;
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: Arc<AppState>) -> Router {
    // Any origin, method and header; credentials allowed. Local development setting.
    Router::new()
        .route("/api/notion_entries", get(notion_entries))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
