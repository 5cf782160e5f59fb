use async_trait::async_trait;
use std::sync::Arc;
use zonesync_application::ports::ServiceDirectory;
use zonesync_domain::{DomainError, ServiceInstance};

use super::ConsulClient;

pub struct ConsulServiceDirectory {
    client: Arc<ConsulClient>,
}

impl ConsulServiceDirectory {
    pub fn new(client: Arc<ConsulClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceDirectory for ConsulServiceDirectory {
    async fn healthy_instances(&self, service: &str) -> Result<Vec<ServiceInstance>, DomainError> {
        self.client.healthy_service(service).await
    }
}
