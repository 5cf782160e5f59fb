use std::sync::Arc;
use tracing::{info, instrument, warn};
use zonesync_domain::{DomainError, ForwardZoneSet, PropagationRequest};

use crate::services::{FanOutPropagator, ForwardZoneStore};

/// Refuses zones that already exist locally, then asks every worker to
/// store the new ones.
pub struct CreateForwardZonesUseCase {
    store: Arc<ForwardZoneStore>,
    propagator: Arc<FanOutPropagator>,
    service: String,
}

impl CreateForwardZonesUseCase {
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
    pub async fn execute(
        &self,
        server_id: &str,
        zones: ForwardZoneSet,
    ) -> Result<ForwardZoneSet, DomainError> {
        if zones.is_empty() {
            return Err(DomainError::InvalidInput("no forward zones given".to_string()));
        }

        let mut current = self.store.load().await?;
        for zone in &zones {
            if current.exists(&zone.name) {
                warn!(zone = %zone.name, "Cannot create forward zone, it already exists");
                return Err(DomainError::ForwardZoneAlreadyExists(zone.name.clone()));
            }
        }

        let request = PropagationRequest::add_forward_zones(server_id, &zones)?;
        self.propagator.broadcast(&self.service, &request).await?;

        info!(count = zones.len(), "Forward zones created");
        Ok(zones)
    }
}
