use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{DomainError, PropagationRequest};

use crate::services::FanOutPropagator;

pub struct FlushFleetCacheUseCase {
    propagator: Arc<FanOutPropagator>,
    service: String,
}

impl FlushFleetCacheUseCase {
    pub fn new(propagator: Arc<FanOutPropagator>, service: impl Into<String>) -> Self {
        Self {
            propagator,
            service: service.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, server_id: &str, domain: &str) -> Result<(), DomainError> {
        if domain.trim().is_empty() {
            return Err(DomainError::InvalidInput("domain is required".to_string()));
        }

        let request = PropagationRequest::flush_cache(server_id, domain);
        self.propagator.broadcast(&self.service, &request).await?;

        info!(domain = %domain, "Fleet cache flushed");
        Ok(())
    }
}
