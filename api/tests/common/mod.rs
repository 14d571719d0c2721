#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use monedas_api::bootstrap::app_context::{AppContext, AppServices};
use monedas_api::bootstrap::config::{Config, UserStoreBackend};
use monedas_api::bootstrap::router::build_router;
use monedas_api::infrastructure::memory::InMemoryUserRepository;

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: String::new(),
        database_max_connections: 1,
        user_store: UserStoreBackend::Memory,
        is_production: false,
    }
}

pub fn test_app() -> Router {
    let services = AppServices::new(Arc::new(InMemoryUserRepository::new()));
    build_router(AppContext::new(test_config(), services), None)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
