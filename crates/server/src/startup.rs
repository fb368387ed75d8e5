use std::net::SocketAddr;

use axum::Router;
use backend::BackendClient;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the REST repositories to the configured store.
pub fn build_state_from_config(cfg: &AppConfig) -> ServerState {
    let client = BackendClient::from_config(&cfg.backend);
    info!(rest_url = %client.rest_url(), schema = ?cfg.backend.schema, "backend client ready");
    ServerState::from_client(client)
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = AppConfig::load_and_validate()?;
    let state = build_state_from_config(&cfg);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting admin api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
