use clap::Parser;
use mimus::cli::Cli;
use mimus::config::Settings;
use mimus::engine::{Generator, ProviderRegistry};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Mimus mock server on {}:{}", host, port);

    // Populate the registry, then freeze it behind an Arc before traffic.
    let registry = Arc::new(ProviderRegistry::with_builtins());
    let generator = Arc::new(Generator::new(registry));

    // Dry-run every template so a malformed route fails boot, not the
    // first request that hits it.
    for route in &settings.routes {
        if let Some(template) = &route.template {
            generator.generate(template).map_err(|e| {
                anyhow::anyhow!("Route '{}' has an invalid template: {}", route.path, e)
            })?;
        }
    }
    info!("Validated {} mock route(s)", settings.routes.len());

    let app = mimus::create_app(&settings, generator);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
