//! # Mimus - Mock API Server
//!
//! Mimus serves realistic fake structured data for development, driven by
//! declarative templates. A template is a plain JSON tree whose keys and
//! string leaves carry two small embedded grammars:
//!
//! - quantifier keys: `"records|20"` (repeat), `"status|1"` (pick one),
//!   `"score|50-100"` (numeric range);
//! - directive leaves: `"@name"`, `"@integer(50, 100)"`,
//!   `"@image(\"200x200\")"`, resolved through a provider registry.
//!
//! ## Quick Start
//!
//! ```rust
//! use mimus::engine::{Generator, ProviderRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), mimus::engine::EngineError> {
//! let registry = Arc::new(ProviderRegistry::with_builtins());
//! let generator = Generator::new(registry);
//!
//! let template = json!({
//!     "records|3": [{ "id": "@id", "score|50-100": 1 }]
//! });
//! let tree = generator.generate(&template)?;
//! assert_eq!(tree["records"].as_array().unwrap().len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Engine**: key parser, directive lexer, quantifier strategy resolver,
//!   provider registry and the recursive generator
//! - **Adapters**: axum handlers wrapping generated trees in the
//!   `{code, data, message}` envelope
//! - **Config**: TOML base config plus per-route JSON template files

pub mod adapters;
pub mod cli;
pub mod config;
pub mod engine;

use crate::adapters::mock_handler;
use crate::config::{RouteMethod, Settings};
use crate::engine::Generator;
use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;

/// Creates the Axum application router with one endpoint per configured
/// mock route.
///
/// Routes sharing a path but differing in method are merged onto one
/// `MethodRouter`; the config validator has already rejected exact
/// method/path duplicates. A plain greeting is served on `/` unless the
/// config claims it.
pub fn create_app(settings: &Settings, generator: Arc<Generator>) -> Router {
    let mut by_path: HashMap<String, MethodRouter> = HashMap::new();

    for route in &settings.routes {
        let handler = {
            let generator = generator.clone();
            let route = route.clone();
            move || {
                let g = generator.clone();
                let r = route.clone();
                async move { mock_handler::respond(g, r).await }
            }
        };
        let method_router = match route.method {
            RouteMethod::Get => get(handler),
            RouteMethod::Post => post(handler),
            RouteMethod::Put => put(handler),
            RouteMethod::Delete => delete(handler),
        };
        let merged = match by_path.remove(&route.path) {
            Some(existing) => existing.merge(method_router),
            None => method_router,
        };
        by_path.insert(route.path.clone(), merged);
    }

    if !by_path.contains_key("/") {
        by_path.insert("/".to_string(), get(|| async { "mimus mock server" }));
    }

    let mut router = Router::new();
    for (path, method_router) in by_path {
        router = router.route(&path, method_router);
    }

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
