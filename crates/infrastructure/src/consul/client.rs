use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use zonesync_domain::config::ConsulConfig;
use zonesync_domain::{DomainError, ServiceInstance};

const TOKEN_HEADER: &str = "X-Consul-Token";

/// Thin client over the Consul agent HTTP API.
pub struct ConsulClient {
    http: Client,
    base_url: String,
    datacenter: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HealthEntry {
    node: HealthNode,
    service: HealthService,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HealthNode {
    #[serde(default)]
    address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HealthService {
    #[serde(default)]
    address: String,
    port: u16,
}

/// Agent service registration payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRegistration {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub check: ServiceCheck,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceCheck {
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    #[serde(rename = "TCP", skip_serializing_if = "Option::is_none")]
    pub tcp: Option<String>,
    pub interval: String,
    pub timeout: String,
    pub deregister_critical_service_after: String,
}

impl ServiceCheck {
    pub fn http(url: impl Into<String>) -> Self {
        Self {
            http: Some(url.into()),
            tcp: None,
            interval: "10s".to_string(),
            timeout: "2s".to_string(),
            deregister_critical_service_after: "1m".to_string(),
        }
    }

    pub fn tcp(address: impl Into<String>) -> Self {
        Self {
            http: None,
            tcp: Some(address.into()),
            ..Self::http("")
        }
    }
}

impl ConsulClient {
    pub fn new(config: &ConsulConfig, timeout: Duration) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("building Consul client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.address.trim_end_matches('/').to_string(),
            datacenter: config.datacenter.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Passing instances of `service`. A node without a service address is
    /// reached on the node address.
    pub async fn healthy_service(&self, service: &str) -> Result<Vec<ServiceInstance>, DomainError> {
        let url = format!("{}/v1/health/service/{}", self.base_url, service);
        let request = self
            .http
            .get(&url)
            .query(&[("passing", "true"), ("dc", self.datacenter.as_str())]);

        let response = self
            .send(request)
            .await
            .map_err(DomainError::DirectoryUnavailable)?;

        let entries: Vec<HealthEntry> = response.json().await.map_err(|e| {
            DomainError::DirectoryUnavailable(format!("decoding health of {}: {}", service, e))
        })?;

        let instances: Vec<ServiceInstance> = entries
            .into_iter()
            .map(|entry| {
                let address = if entry.service.address.is_empty() {
                    entry.node.address
                } else {
                    entry.service.address
                };
                ServiceInstance::new(address, entry.service.port)
            })
            .collect();

        debug!(service = %service, healthy = instances.len(), "Resolved healthy instances");
        Ok(instances)
    }

    pub async fn put_kv(&self, key: &str, value: Vec<u8>) -> Result<(), DomainError> {
        let url = format!("{}/v1/kv/{}", self.base_url, key.trim_start_matches('/'));
        let request = self
            .http
            .put(&url)
            .query(&[("dc", self.datacenter.as_str())])
            .body(value);

        let response = self.send(request).await.map_err(DomainError::BackendWrite)?;
        let accepted = response
            .text()
            .await
            .map_err(|e| DomainError::BackendWrite(e.to_string()))?;

        if accepted.trim() != "true" {
            return Err(DomainError::BackendWrite(format!(
                "Consul refused write to {}",
                key
            )));
        }
        Ok(())
    }

    pub async fn register(&self, registration: &ServiceRegistration) -> Result<(), DomainError> {
        let url = format!("{}/v1/agent/service/register", self.base_url);
        let request = self.http.put(&url).json(registration);

        self.send(request)
            .await
            .map_err(DomainError::DirectoryUnavailable)?;
        Ok(())
    }

    pub async fn deregister(&self, service_id: &str) -> Result<(), DomainError> {
        let url = format!(
            "{}/v1/agent/service/deregister/{}",
            self.base_url, service_id
        );

        self.send(self.http.put(&url))
            .await
            .map_err(DomainError::DirectoryUnavailable)?;
        Ok(())
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, String> {
        let response = self
            .with_token(request)
            .send()
            .await
            .map_err(|e| format!("Consul agent at {} unreachable: {}", self.base_url, e))?;
        check_status(&self.base_url, response)
    }
}

fn check_status(target: &str, response: Response) -> Result<Response, String> {
    let status = response.status();
    if !status.is_success() {
        return Err(format!(
            "Consul agent at {} returned HTTP {}: {}",
            target,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ));
    }
    Ok(response)
}
