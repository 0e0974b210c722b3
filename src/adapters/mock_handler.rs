//! HTTP-facing side of the engine: per-route response generation and the
//! `{code, data, message}` envelope.

use crate::config::RouteConfig;
use crate::engine::Generator;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Response envelope every mock route answers with. `data` is omitted for
/// routes that carry no template (plain status answers like logout).
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub message: String,
}

/// Generates the response for one configured route.
///
/// A generation failure never leaks a partial tree: the whole call answers
/// with HTTP 500, `code: -1` and the engine error as the message. The shared
/// registry and concurrent requests are unaffected.
pub async fn respond(generator: Arc<Generator>, route: RouteConfig) -> (StatusCode, Json<Envelope>) {
    let data = match &route.template {
        None => None,
        Some(template) => match generator.generate(template) {
            Ok(tree) => Some(tree),
            Err(e) => {
                error!(path = %route.path, "mock generation failed: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope {
                        code: -1,
                        data: None,
                        message: e.to_string(),
                    }),
                );
            }
        },
    };

    debug!(path = %route.path, "generated mock response");
    (
        StatusCode::OK,
        Json(Envelope {
            code: route.code,
            data,
            message: route.message.clone(),
        }),
    )
}
