// Section Lookup API Server Entry Point
//
// Loads both tables, then serves GET /section/:input
// Usage: SECTION_DATA_DIR=/opt/sections cargo run --bin section_api

use section_api::{create_router, AppState, ServerConfig};
use section_core::{LookupConfig, SectionLookup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "section_core=info,section_api=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LookupConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  UC file: {}", config.uc_path().display());
    tracing::info!("  UB file: {}", config.ub_path().display());
    tracing::info!("  Match policy: {}", config.match_policy);

    // Both tables must load before we accept requests
    let lookup = SectionLookup::from_config(&config)?;
    let app = create_router(AppState::new(lookup));

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
