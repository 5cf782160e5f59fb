use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::service::TowerToHyperService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

/// Peer API behind mutual TLS. Connections without a certificate issued by
/// the fleet CA never reach the router.
pub async fn serve_internal(
    listener: TcpListener,
    tls_config: Arc<ServerConfig>,
    router: Router,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let bind_addr = listener.local_addr()?;
    let acceptor = TlsAcceptor::from(tls_config);
    info!(bind_address = %bind_addr, "Internal mTLS API listening");

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            accepted = listener.accept() => {
                let (tcp_stream, peer_addr) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept internal connection");
                        continue;
                    }
                };

                let acceptor = acceptor.clone();
                let router = router.clone();

                tokio::spawn(async move {
                    let tls_stream = match acceptor.accept(tcp_stream).await {
                        Ok(s) => s,
                        Err(e) => {
                            debug!(peer = %peer_addr, error = %e, "Internal TLS handshake failed");
                            return;
                        }
                    };

                    let service = TowerToHyperService::new(router);
                    if let Err(e) = Builder::new(TokioExecutor::new())
                        .serve_connection_with_upgrades(TokioIo::new(tls_stream), service)
                        .await
                    {
                        debug!(peer = %peer_addr, error = %e, "Internal connection error");
                    }
                });
            }
        }
    }

    info!("Internal mTLS API stopped");
    Ok(())
}
