use std::sync::Arc;
use tracing::{info, instrument, warn};
use zonesync_domain::name::canonicalize;
use zonesync_domain::{DomainError, ForwardZone, ForwardZoneSet, PropagationRequest};

use crate::services::{FanOutPropagator, ForwardZoneStore};

/// Deletes forward zones fleet-wide. Every target must exist locally before
/// anything is broadcast.
pub struct DeleteForwardZonesUseCase {
    store: Arc<ForwardZoneStore>,
    propagator: Arc<FanOutPropagator>,
    service: String,
}

impl DeleteForwardZonesUseCase {
    pub fn new(
        store: Arc<ForwardZoneStore>,
        propagator: Arc<FanOutPropagator>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            store,
            propagator,
            service: service.into(),
        }
    }

    #[instrument(skip(self, zones), fields(count = zones.len()))]
    pub async fn execute(&self, server_id: &str, zones: ForwardZoneSet) -> Result<(), DomainError> {
        if zones.is_empty() {
            return Err(DomainError::InvalidInput("no forward zones given".to_string()));
        }

        let mut current = self.store.load().await?;
        for zone in &zones {
            if !current.exists(&zone.name) {
                warn!(zone = %zone.name, "Cannot delete forward zone, it is not forwarded");
                return Err(DomainError::ForwardZoneNotFound(zone.name.clone()));
            }
        }

        let request = PropagationRequest::delete_forward_zones(server_id, &zones)?;
        self.propagator.broadcast(&self.service, &request).await?;

        info!(count = zones.len(), "Forward zones deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn execute_one(&self, server_id: &str, zone_id: &str) -> Result<(), DomainError> {
        ForwardZone::validate_name(zone_id)?;

        let mut current = self.store.load().await?;
        if !current.exists(zone_id) {
            warn!(zone = %zone_id, "Cannot delete forward zone, it is not forwarded");
            return Err(DomainError::ForwardZoneNotFound(canonicalize(zone_id)));
        }

        let request = PropagationRequest::delete_forward_zone(server_id, zone_id);
        self.propagator.broadcast(&self.service, &request).await?;

        info!(zone = %zone_id, "Forward zone deleted");
        Ok(())
    }
}
