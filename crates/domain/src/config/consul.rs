use serde::{Deserialize, Serialize};

use crate::peer::ServiceIdentity;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsulConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_datacenter")]
    pub datacenter: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_trust_domain")]
    pub trust_domain: String,

    /// Public service; peers are discovered through its health checks.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Identity peers must present on the internal listener.
    #[serde(default = "default_internal_service_name")]
    pub internal_service_name: String,

    #[serde(default = "default_true")]
    pub register: bool,

    #[serde(default)]
    pub token: Option<String>,
}

impl ConsulConfig {
    pub fn internal_identity(&self) -> ServiceIdentity {
        ServiceIdentity::new(
            &self.trust_domain,
            &self.namespace,
            &self.datacenter,
            &self.internal_service_name,
        )
    }
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            datacenter: default_datacenter(),
            namespace: default_namespace(),
            trust_domain: default_trust_domain(),
            service_name: default_service_name(),
            internal_service_name: default_internal_service_name(),
            register: true,
            token: None,
        }
    }
}

fn default_address() -> String {
    "http://127.0.0.1:8500".to_string()
}

fn default_datacenter() -> String {
    "dc1".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_trust_domain() -> String {
    "consul".to_string()
}

fn default_service_name() -> String {
    "pdns-api".to_string()
}

fn default_internal_service_name() -> String {
    "pdns-api-internal".to_string()
}

fn default_true() -> bool {
    true
}
