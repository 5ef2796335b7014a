//! Binary entrypoint for the leaderboard HTTP host.

use std::net::SocketAddr;
use std::sync::Arc;

use leaderboard_engine::Config;
use leaderboard_server::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  leaderboard_engine::init_tracing();

  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5005".into())
    .parse()?;

  let state = Arc::new(AppState::new(Config::from_env()));
  let app = leaderboard_server::router(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  info!("leaderboard-server listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
