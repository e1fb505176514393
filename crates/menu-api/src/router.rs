use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let storage = &state.config.storage;
    let assets = ServeDir::new(storage.static_dir.join("assets"));
    let uploads = ServeDir::new(&storage.uploads_dir);

    let pages = Router::new()
        .route("/", get(handlers::public::home))
        .route("/category", get(handlers::public::category))
        .route("/admin", get(handlers::admin::show).post(handlers::admin::submit))
        .route("/health", get(handlers::health::health_check));

    let body_limit = state.config.upload.max_body_bytes;

    pages
        .nest_service("/assets", assets)
        .nest_service("/uploads", uploads)
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        // Body limit for admin uploads
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
