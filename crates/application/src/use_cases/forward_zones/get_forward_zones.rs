use std::sync::Arc;
use zonesync_domain::{DomainError, ForwardZone, ForwardZoneSet};

use crate::services::ForwardZoneStore;

pub struct GetForwardZonesUseCase {
    store: Arc<ForwardZoneStore>,
}

impl GetForwardZonesUseCase {
    pub fn new(store: Arc<ForwardZoneStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<ForwardZoneSet, DomainError> {
        self.store.load().await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<ForwardZone, DomainError> {
        let zones = self.store.load().await?;
        zones
            .find(name)
            .cloned()
            .ok_or_else(|| DomainError::ForwardZoneNotFound(name.to_string()))
    }
}
