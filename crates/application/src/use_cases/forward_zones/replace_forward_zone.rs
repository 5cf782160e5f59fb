use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{DomainError, ForwardZone, ForwardZoneSet};

use crate::services::ForwardZoneStore;

pub struct ReplaceForwardZoneUseCase {
    store: Arc<ForwardZoneStore>,
}

impl ReplaceForwardZoneUseCase {
    pub fn new(store: Arc<ForwardZoneStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, zone), fields(name = %zone.name))]
    pub async fn execute(
        &self,
        zone_id: &str,
        zone: ForwardZone,
    ) -> Result<ForwardZoneSet, DomainError> {
        let zone = zone.validate()?;
        let target = zone_id.to_string();

        let updated = self
            .store
            .modify(move |current| current.replace(&target, zone))
            .await?;

        info!(zone = %zone_id, "Forward zone replaced");
        Ok(updated)
    }
}
