use super::mock_handler::respond;
use crate::config::{RouteConfig, RouteMethod};
use crate::engine::{Generator, ProviderRegistry};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

fn generator() -> Arc<Generator> {
    Arc::new(Generator::new(Arc::new(ProviderRegistry::with_builtins())))
}

fn route(template: Option<serde_json::Value>) -> RouteConfig {
    RouteConfig {
        method: RouteMethod::Get,
        path: "/test".to_string(),
        code: 0,
        message: "ok".to_string(),
        template,
    }
}

#[tokio::test]
async fn test_respond_without_template_omits_data() {
    let (status, body) = respond(generator(), route(None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.code, 0);
    assert!(body.data.is_none());
    assert_eq!(body.message, "ok");

    // data must not serialize as null when absent
    let rendered = serde_json::to_value(&body.0).unwrap();
    assert!(rendered.get("data").is_none());
}

#[tokio::test]
async fn test_respond_generates_data() {
    let template = json!({"score|50-100": 1, "token": "@string(8)"});
    let (status, body) = respond(generator(), route(Some(template))).await;
    assert_eq!(status, StatusCode::OK);
    let data = body.0.data.unwrap();
    assert!((50..=100).contains(&data["score"].as_i64().unwrap()));
    assert_eq!(data["token"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_respond_maps_engine_errors_to_500() {
    let template = json!({"x": "@nosuch"});
    let (status, body) = respond(generator(), route(Some(template))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, -1);
    assert!(body.data.is_none());
    assert!(body.message.contains("nosuch"));
}
