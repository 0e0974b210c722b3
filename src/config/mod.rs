use config::{Config, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod validator;

use crate::cli::Cli;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    /// Mock routes. Defined inline in `mimus.toml` or as one JSON file per
    /// route under `<config root>/routes/`.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// HTTP method a mock route answers on.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One mocked endpoint: a method/path pair plus the response envelope
/// fields and an optional generation template for the `data` payload.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RouteConfig {
    pub method: RouteMethod,
    pub path: String,
    /// Envelope `code` field, `0` by default.
    #[serde(default)]
    pub code: i64,
    /// Envelope `message` field.
    #[serde(default = "default_message")]
    pub message: String,
    /// Template for the envelope `data` field. Routes without a template
    /// answer with code and message only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
}

fn default_message() -> String {
    "ok".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .map(|p| p.to_str().unwrap_or("."))
            .unwrap_or(".");

        // Build config from file
        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 6006)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // Apply CLI overrides (CLI > env vars > config file)
        settings.apply_cli_overrides(cli);

        settings.load_external_routes(root)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("mimus");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 6006)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_external_routes(root)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    /// Loads per-route JSON files from `<root>/routes/`. Route templates
    /// live outside the TOML base config so annotated keys like
    /// `"records|20"` survive untouched.
    fn load_external_routes(&mut self, root: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{root}/routes/*.json");
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            let content = std::fs::read_to_string(&path)?;
            let route: RouteConfig = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid route file {}: {}", path.display(), e))?;
            self.routes.push(route);
        }
        Ok(())
    }
}
