use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::{ChangeType, DomainError, PropagationRequest, ZonePatch};

use crate::ports::AuthoritativeNameserver;
use crate::services::{FanOutPropagator, ReverseRecordSynchronizer};

/// Applies rrset changes to the authoritative server, keeps PTRs in step and
/// then flushes every changed name from the fleet's caches.
pub struct PatchZoneUseCase {
    nameserver: Arc<dyn AuthoritativeNameserver>,
    reverse: Arc<ReverseRecordSynchronizer>,
    propagator: Arc<FanOutPropagator>,
    service: String,
}

impl PatchZoneUseCase {
    pub fn new(
        nameserver: Arc<dyn AuthoritativeNameserver>,
        reverse: Arc<ReverseRecordSynchronizer>,
        propagator: Arc<FanOutPropagator>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            nameserver,
            reverse,
            propagator,
            service: service.into(),
        }
    }

    #[instrument(skip(self, patch), fields(rrsets = patch.rrsets.len()))]
    pub async fn execute(
        &self,
        server_id: &str,
        zone_id: &str,
        patch: &ZonePatch,
    ) -> Result<(), DomainError> {
        if patch.rrsets.is_empty() {
            return Err(DomainError::InvalidInput("no rrsets given".to_string()));
        }

        for rrset in &patch.rrsets {
            match rrset.changetype {
                ChangeType::Replace => {
                    self.nameserver
                        .add_record_set(server_id, zone_id, rrset)
                        .await?;
                    if rrset.wants_ptr() {
                        self.reverse.add_reverse(server_id, zone_id, rrset).await?;
                    }
                }
                ChangeType::Delete => {
                    self.nameserver
                        .remove_record_set(server_id, zone_id, rrset)
                        .await?;
                    self.reverse.del_reverse(server_id, zone_id, rrset).await?;
                }
            }

            info!(
                zone = %zone_id,
                name = %rrset.name,
                record_type = %rrset.record_type,
                changetype = ?rrset.changetype,
                "Resource record set patched"
            );
        }

        for rrset in &patch.rrsets {
            let request = PropagationRequest::flush_cache(server_id, &rrset.name);
            self.propagator.broadcast(&self.service, &request).await?;
        }

        Ok(())
    }
}
