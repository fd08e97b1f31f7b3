use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::files::resolver::PathResolver;
use crate::http::connection::Connection;

/// Binds the configured address and serves until cancelled.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let resolver = Arc::new(PathResolver::new(cfg)?);
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, resolver).await
}

/// Accept loop over an already-bound listener.
///
/// Split from [`run`] so tests can bind port 0 and learn the local
/// address before serving. Each accepted connection is handled by its own
/// task; the only shared state is the read-only resolver.
pub async fn serve(listener: TcpListener, resolver: Arc<PathResolver>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, resolver);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
