use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{DomainError, ForwardZone, PropagationRequest};

use crate::services::FanOutPropagator;

pub struct UpdateForwardZoneUseCase {
    propagator: Arc<FanOutPropagator>,
    service: String,
}

impl UpdateForwardZoneUseCase {
    pub fn new(propagator: Arc<FanOutPropagator>, service: impl Into<String>) -> Self {
        Self {
            propagator,
            service: service.into(),
        }
    }

    #[instrument(skip(self, zone))]
    pub async fn execute(
        &self,
        server_id: &str,
        zone_id: &str,
        zone: ForwardZone,
    ) -> Result<ForwardZone, DomainError> {
        ForwardZone::validate_name(zone_id)?;
        let zone = zone.validate()?;

        let request = PropagationRequest::update_forward_zone(server_id, zone_id, &zone)?;
        self.propagator.broadcast(&self.service, &request).await?;

        info!(zone = %zone_id, name = %zone.name, "Forward zone updated");
        Ok(zone)
    }
}
