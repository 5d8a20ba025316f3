//! HTTP API for the activity relayer.
//!
//! Clients post events and status updates, and read an actor's events back
//! page by page. Payloads are validated against closed schemas before they
//! reach the [`relay_backend::Backend`]. Every response body is JSON with an
//! `ok` flag; failures carry a stable `error` code.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use auth::{ApiKeyAuth, API_KEY_HEADER};
pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::AppState;
pub use server::RelayServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use relay_backend::{Backend, BackendConfig};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::*;

    const KEY: &str = "test-key";
    const ACTOR: &str = "0x1111111111111111111111111111111111111111";

    fn app_with_key(key: Option<&str>) -> Router {
        let backend = Arc::new(Backend::new(BackendConfig::default(), None));
        router::build_router(AppState::new(backend), ApiKeyAuth::new(key.map(String::from)))
    }

    fn app() -> Router {
        app_with_key(Some(KEY))
    }

    fn event() -> Value {
        json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "createdAt": "2026-02-10T09:15:00.000Z",
            "actor": ACTOR,
            "app": "arc-stable-toolbox",
            "intentId": uuid::Uuid::new_v4().to_string(),
            "kind": "bridge",
            "status": "started"
        })
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header(API_KEY_HEADER, KEY)
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(API_KEY_HEADER, KEY)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app_with_key(None);
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, body) = send(&app(), get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "ok": false, "error": "not_found" }));
    }

    #[tokio::test]
    async fn wrong_method_is_json_not_found() {
        let (status, body) = send(&app(), get("/event")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "ok": false, "error": "not_found" }));

        let (status, body) = send(&app(), post("/events", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "ok": false, "error": "not_found" }));

        let (status, body) = send(&app(), get("/event/status")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn wrong_method_without_key_is_unauthorized() {
        let req = Request::builder().uri("/event").body(Body::empty()).unwrap();
        let (status, body) = send(&app(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn missing_key_is_unauthorized() {
        let req = Request::builder()
            .method("POST")
            .uri("/event")
            .body(Body::from(event().to_string()))
            .unwrap();
        let (status, body) = send(&app(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn unconfigured_key_is_server_error() {
        let (status, body) = send(&app_with_key(None), get(&format!("/events?actor={ACTOR}"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "api_key_not_configured");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_json() {
        let (status, body) = send(&app(), post("/event", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_json");
    }

    #[tokio::test]
    async fn schema_violations_are_listed() {
        let mut payload = event();
        payload.as_object_mut().unwrap().remove("actor");
        payload["foo"] = json!("bar");

        let (status, body) = send(&app(), post("/event", payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&json!("actor")));
        assert!(errors.contains(&json!("extra:root.foo")));
    }

    #[tokio::test]
    async fn duplicate_append_conflicts() {
        let app = app();
        let payload = event();
        let (status, body) = send(&app, post("/event", payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], payload["id"]);

        let (status, body) = send(&app, post("/event", payload.to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "event_exists");
    }

    #[tokio::test]
    async fn status_update_for_unknown_event_is_not_found() {
        let update = json!({
            "actor": ACTOR,
            "id": uuid::Uuid::new_v4().to_string(),
            "status": "failed"
        });
        let (status, body) = send(&app(), post("/event/status", update.to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn events_require_valid_actor() {
        let (status, body) = send(&app(), get("/events?actor=0xNOPE")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"], json!(["actor"]));

        let (status, _) = send(&app(), get("/events")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn event_lifecycle() {
        let app = app();
        let payload = event();
        let id = payload["id"].as_str().unwrap().to_string();
        let (status, _) = send(&app, post("/event", payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);

        let source = format!("0x{}", "a".repeat(64));
        let update = json!({
            "actor": ACTOR,
            "id": id,
            "status": "submitted",
            "tx": { "sourceTxHash": source }
        });
        let (status, body) = send(&app, post("/event/status", update.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["status"], "submitted");
        assert_eq!(body["event"]["tx"]["sourceTxHash"], source);

        let (status, body) = send(&app, get(&format!("/events?actor={ACTOR}&limit=20"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["id"], json!(id));
        assert_eq!(body["items"][0]["status"], "submitted");
        assert_eq!(body["nextCursor"], Value::Null);
    }

    #[tokio::test]
    async fn events_page_with_cursor() {
        let app = app();
        for _ in 0..3 {
            send(&app, post("/event", event().to_string())).await;
        }

        let (_, body) = send(&app, get(&format!("/events?actor={ACTOR}&limit=2"))).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["nextCursor"], "2");

        let (_, body) = send(
            &app,
            get(&format!("/events?actor={ACTOR}&limit=2&cursor=2")),
        )
        .await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["nextCursor"], Value::Null);
    }
}
