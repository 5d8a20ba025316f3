use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::{require_api_key, ApiKeyAuth};
use crate::handler::{self, AppState};

/// Build the relayer router. Everything except `/health` requires the API key.
/// A known path hit with the wrong method answers like an unknown path.
pub fn build_router(state: AppState, auth: ApiKeyAuth) -> Router {
    let protected = Router::new()
        .route(
            "/event",
            post(handler::append_event).fallback(handler::not_found),
        )
        .route(
            "/event/status",
            post(handler::update_status).fallback(handler::not_found),
        )
        .route(
            "/events",
            get(handler::list_events).fallback(handler::not_found),
        )
        .route_layer(from_fn_with_state(Arc::new(auth), require_api_key));

    Router::new()
        .route("/health", get(handler::health))
        .merge(protected)
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
