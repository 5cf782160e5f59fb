use async_trait::async_trait;
use zonesync_domain::{DomainError, ServiceInstance};

#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Instances whose health checks are all passing. An unreachable
    /// registry is an error, never an empty list.
    async fn healthy_instances(&self, service: &str) -> Result<Vec<ServiceInstance>, DomainError>;
}
