use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{DomainError, ForwardZoneSet};

use crate::services::ForwardZoneStore;

/// Worker side of a bulk delete. A missing zone aborts before anything is
/// written.
pub struct RemoveForwardZonesUseCase {
    store: Arc<ForwardZoneStore>,
}

impl RemoveForwardZonesUseCase {
    pub fn new(store: Arc<ForwardZoneStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, zones), fields(count = zones.len()))]
    pub async fn execute(&self, zones: ForwardZoneSet) -> Result<ForwardZoneSet, DomainError> {
        let names: Vec<String> = zones.iter().map(|z| z.name.clone()).collect();
        let targets = names.clone();

        let updated = self
            .store
            .modify(move |current| {
                targets
                    .iter()
                    .try_fold(current, |set, name| set.delete(name))
            })
            .await?;

        info!(zones = ?names, total = updated.len(), "Forward zones removed");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn execute_one(&self, name: &str) -> Result<ForwardZoneSet, DomainError> {
        let target = name.to_string();
        let updated = self.store.modify(move |current| current.delete(&target)).await?;

        info!(zone = %name, total = updated.len(), "Forward zone removed");
        Ok(updated)
    }
}
