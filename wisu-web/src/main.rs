//! wisu-web - Wiki Survey service
//!
//! Citizen survey over pairwise idea comparison: participants propose
//! ideas under open questions and judge idea pairs one at a time;
//! win/loss tallies approximate a ranking.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use wisu_common::config;
use wisu_web::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "wisu-web", about = "Wiki Survey service")]
struct Args {
    /// Root folder holding the database (overrides WISU_ROOT and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP port (overrides the settings table)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting WiSu Wiki Survey (wisu-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = config::prepare_root_folder(&root_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = wisu_common::db::init_database(&db_path).await?;

    let port = match args.port {
        Some(port) => port,
        None => config::load_http_port(&pool).await,
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("wisu-web listening on http://127.0.0.1:{port}");
    info!("Health check: http://127.0.0.1:{port}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
