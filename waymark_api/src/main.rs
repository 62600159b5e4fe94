mod app;
mod error;
mod index;
mod route;
mod state;

use std::sync::Arc;

use axum::serve;
use mimalloc::MiMalloc;
use tracing::{Level, info};
use waymark_google::directions_client::DirectionsClient;
use waymark_map::html::TileLayer;

use crate::state::AppState;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const BIND_ENV_VAR: &str = "WAYMARK_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let state = Arc::new(AppState {
        directions_client: DirectionsClient::from_env()?,
        tiles: TileLayer::from_env(),
    });

    let bind = std::env::var(BIND_ENV_VAR).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, app::app(state)).await?;

    Ok(())
}
