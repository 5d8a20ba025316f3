use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Json;
use relay_backend::Backend;
use relay_schema::{parse_event, parse_status_update, Rule, ValidationErrors};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

impl AppState {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub actor: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

/// `POST /event`
pub async fn append_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = read_json(&body)?;
    let event = parse_event(&payload)?;
    let id = event.id.clone();
    state.backend.append_event(event).await?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// `POST /event/status`
pub async fn update_status(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = read_json(&body)?;
    let update = parse_status_update(&payload)?;
    let event = state
        .backend
        .update_event_status(&update.actor, &update.id, update.status, update.tx.as_ref())
        .await?;
    Ok(Json(json!({ "ok": true, "event": event })))
}

/// `GET /events?actor=&limit=&cursor=`
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Value>, ApiError> {
    let actor = query
        .actor
        .filter(|actor| Rule::Address.accepts(&Value::String(actor.clone())))
        .ok_or_else(|| ValidationErrors::new(vec!["actor".to_string()]))?;
    let limit = query.limit.and_then(|limit| limit.trim().parse::<i64>().ok());

    let page = state
        .backend
        .get_events(&actor, limit, query.cursor.as_deref())
        .await?;
    Ok(Json(json!({
        "ok": true,
        "items": page.items,
        "nextCursor": page.next_cursor,
    })))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "version": env!("CARGO_PKG_VERSION") }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn read_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)
}
