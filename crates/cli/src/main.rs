use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use zonesync_api::{create_internal_routes, create_public_routes};
use zonesync_domain::{CliOverrides, Role};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "zonesync")]
#[command(version)]
#[command(about = "Keeps forward zones and PTR records consistent across a PowerDNS fleet")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Process role (api, worker)
    #[arg(short = 'r', long)]
    role: Option<Role>,

    /// Public HTTP port
    #[arg(short = 'p', long)]
    public_port: Option<u16>,

    /// Internal mTLS port
    #[arg(short = 'i', long)]
    internal_port: Option<u16>,

    /// Bind address for both listeners
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Forward-zones file path
    #[arg(long)]
    forward_zones_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        role: cli.role,
        public_port: cli.public_port,
        internal_port: cli.internal_port,
        bind_address: cli.bind.clone(),
        forward_zones_file: cli.forward_zones_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        role = %config.role,
        environment = %config.environment,
        "Starting zonesync"
    );

    let services = di::Services::new(&config)?;

    let public_listener = TcpListener::bind(config.public_http.socket_address()).await?;
    let internal_listener = TcpListener::bind(config.internal_http.socket_address()).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let public = tokio::spawn(server::serve_public(
        public_listener,
        create_public_routes(services.state.clone()),
        shutdown_rx.clone(),
    ));
    let internal = tokio::spawn(server::serve_internal(
        internal_listener,
        services.tls.server_config()?,
        create_internal_routes(services.state.clone()),
        shutdown_rx,
    ));

    let registration = if config.consul.register {
        Some(server::Registration::register(services.consul.clone(), &config).await?)
    } else {
        None
    };

    bootstrap::shutdown_signal().await;
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);

    if let Some(registration) = registration {
        registration.deregister().await;
    }

    for (name, handle) in [("public", public), ("internal", internal)] {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(listener = name, error = %e, "Listener stopped with error"),
            Err(e) => error!(listener = name, error = %e, "Listener task panicked"),
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
