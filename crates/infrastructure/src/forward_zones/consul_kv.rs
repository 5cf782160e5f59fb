use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use zonesync_application::ports::ForwardZoneWriter;
use zonesync_domain::{DomainError, ForwardZoneSet};

use crate::consul::ConsulClient;

/// Fleet-wide copy of the forward zones as a JSON array under one KV key.
pub struct ConsulKvForwardZoneWriter {
    client: Arc<ConsulClient>,
    key: String,
}

impl ConsulKvForwardZoneWriter {
    pub fn new(client: Arc<ConsulClient>, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl ForwardZoneWriter for ConsulKvForwardZoneWriter {
    fn name(&self) -> &str {
        "consul-kv"
    }

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError> {
        let body = zones.to_json()?;
        self.client
            .put_kv(&self.key, body)
            .await
            .map_err(|e| match e {
                DomainError::BackendWrite(msg) => {
                    DomainError::BackendWrite(format!("consul kv '{}': {}", self.key, msg))
                }
                other => other,
            })?;

        debug!(key = %self.key, zones = zones.len(), "Forward zones stored in Consul KV");
        Ok(())
    }
}
