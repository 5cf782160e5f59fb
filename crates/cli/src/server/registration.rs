use std::sync::Arc;
use tracing::{info, warn};
use zonesync_domain::Config;
use zonesync_infrastructure::consul::{ConsulClient, ServiceCheck, ServiceRegistration};

/// Services this process registered with the local Consul agent.
pub struct Registration {
    client: Arc<ConsulClient>,
    service_ids: Vec<String>,
}

impl Registration {
    /// Registers the public service with an HTTP check on the health route
    /// and the internal service with a TCP check, since the internal
    /// listener only speaks mutual TLS.
    pub async fn register(client: Arc<ConsulClient>, config: &Config) -> anyhow::Result<Self> {
        let node = hostname::get()?.to_string_lossy().into_owned();

        let public_address = advertised_address(&config.public_http.bind_address, &node);
        let internal_address = advertised_address(&config.internal_http.bind_address, &node);

        let registrations = [
            ServiceRegistration {
                id: format!("{}-{}", config.consul.service_name, node),
                name: config.consul.service_name.clone(),
                address: public_address.clone(),
                port: config.public_http.port,
                tags: vec![config.role.to_string(), config.environment.clone()],
                check: ServiceCheck::http(format!(
                    "http://{}:{}/api/v1/health",
                    public_address, config.public_http.port
                )),
            },
            ServiceRegistration {
                id: format!("{}-{}", config.consul.internal_service_name, node),
                name: config.consul.internal_service_name.clone(),
                address: internal_address.clone(),
                port: config.internal_http.port,
                tags: vec![config.role.to_string(), config.environment.clone()],
                check: ServiceCheck::tcp(format!(
                    "{}:{}",
                    internal_address, config.internal_http.port
                )),
            },
        ];

        let mut service_ids = Vec::with_capacity(registrations.len());
        for registration in &registrations {
            client.register(registration).await?;
            info!(
                service = %registration.name,
                id = %registration.id,
                address = %registration.address,
                port = registration.port,
                "Registered with Consul"
            );
            service_ids.push(registration.id.clone());
        }

        Ok(Self {
            client,
            service_ids,
        })
    }

    pub async fn deregister(self) {
        for id in &self.service_ids {
            match self.client.deregister(id).await {
                Ok(()) => info!(id = %id, "Deregistered from Consul"),
                Err(e) => warn!(id = %id, error = %e, "Failed to deregister from Consul"),
            }
        }
    }
}

fn advertised_address(bind_address: &str, node: &str) -> String {
    match bind_address {
        "0.0.0.0" | "::" | "[::]" => node.to_string(),
        other => other.to_string(),
    }
}
