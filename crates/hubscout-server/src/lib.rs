// Aggregation endpoints: one GET route per content type, each a pure
// pass-through of fetch -> normalize -> cache directive. Handlers hold no
// cross-request state beyond the shared response cache.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

use tracing::info;

/// Bind and serve the aggregation endpoints until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("aggregation endpoints listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
