use async_trait::async_trait;
use zonesync_domain::DomainError;

#[async_trait]
pub trait ResolverReloader: Send + Sync {
    async fn reload(&self) -> Result<(), DomainError>;
}
