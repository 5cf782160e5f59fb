use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

pub async fn serve_public(
    listener: TcpListener,
    router: Router,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let bind_addr = listener.local_addr()?;
    info!(
        bind_address = %bind_addr,
        api_url = format!("http://{}/api/v1", bind_addr),
        "Public API listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await?;

    info!("Public API stopped");
    Ok(())
}
