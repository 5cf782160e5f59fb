use async_trait::async_trait;
use zonesync_domain::{DomainError, ForwardZoneSet};

/// Persists a whole forward-zone set. Partial updates are never written.
#[async_trait]
pub trait ForwardZoneWriter: Send + Sync {
    fn name(&self) -> &str;

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError>;
}

/// Reads the authoritative local copy at the start of a mutation.
#[async_trait]
pub trait ForwardZoneSource: Send + Sync {
    async fn load(&self) -> Result<ForwardZoneSet, DomainError>;
}
