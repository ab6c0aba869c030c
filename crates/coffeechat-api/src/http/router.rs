//! Axum router for the web front-end.
//!
//! Pages live at the same paths as their [`View`](coffeechat_types::view::View),
//! so a mutation's navigation target is directly a redirect location.
//! Middleware: request tracing with a per-request id.

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::handlers::pages;
use crate::state::AppState;

/// Build the complete router with all pages and middleware.
pub fn build_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %req.method(),
            uri = %req.uri(),
            request_id = %uuid::Uuid::now_v7(),
        )
    });

    Router::new()
        .route("/", get(pages::listing))
        .route("/chats", post(pages::create))
        .route("/chats/new", get(pages::new_form))
        .route("/chats/{id}", get(pages::detail).post(pages::update))
        .route("/chats/{id}/edit", get(pages::edit_form))
        .route("/chats/{id}/delete", post(pages::delete))
        .route("/health", get(health_check))
        .layer(trace)
        .with_state(state)
}

/// GET /health - Liveness plus the backend this server talks to.
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.base_url(),
        "stale_views": state.cache.stale_views().iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))
}
