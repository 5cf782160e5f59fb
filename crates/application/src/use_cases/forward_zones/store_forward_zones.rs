use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{DomainError, ForwardZoneSet};

use crate::services::ForwardZoneStore;

/// Worker side of a create: upserts every received zone into the local set.
pub struct StoreForwardZonesUseCase {
    store: Arc<ForwardZoneStore>,
}

impl StoreForwardZonesUseCase {
    pub fn new(store: Arc<ForwardZoneStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, zones), fields(count = zones.len()))]
    pub async fn execute(&self, zones: ForwardZoneSet) -> Result<ForwardZoneSet, DomainError> {
        let names: Vec<String> = zones.iter().map(|z| z.name.clone()).collect();

        let updated = self
            .store
            .modify(move |current| Ok(zones.into_iter().fold(current, |set, zone| set.upsert(zone))))
            .await?;

        info!(zones = ?names, total = updated.len(), "Forward zones stored");
        Ok(updated)
    }
}
