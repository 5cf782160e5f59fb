use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::name::decanonicalize;
use zonesync_domain::{
    ChangeType, DomainError, RecordType, ResourceRecordChange, SearchObjectType,
};

use crate::ports::AuthoritativeNameserver;

/// Keeps PTR records in the reverse zone in step with forward A/AAAA sets.
///
/// Both operations stop at the first failing nameserver call; records already
/// added or removed in the same call stay that way.
pub struct ReverseRecordSynchronizer {
    nameserver: Arc<dyn AuthoritativeNameserver>,
    reverse_zone: String,
    max_search_results: usize,
}

impl ReverseRecordSynchronizer {
    pub fn new(
        nameserver: Arc<dyn AuthoritativeNameserver>,
        reverse_zone: impl Into<String>,
        max_search_results: usize,
    ) -> Self {
        Self {
            nameserver,
            reverse_zone: reverse_zone.into(),
            max_search_results,
        }
    }

    pub fn reverse_zone(&self) -> &str {
        &self.reverse_zone
    }

    /// Removes stale PTRs pointing at the change's name, then adds one PTR
    /// per record.
    #[instrument(skip(self, change), fields(name = %change.name, record_type = %change.record_type))]
    pub async fn add_reverse(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        if !change.record_type.is_address() {
            return Ok(());
        }

        self.del_reverse(server_id, zone_id, change).await?;

        for record in &change.records {
            let ptr = change.reverse_change(record)?;
            self.nameserver
                .add_record_set(server_id, &self.reverse_zone, &ptr)
                .await
                .map_err(|e| with_content(e, &record.content))?;

            info!(
                zone = %zone_id,
                ptr = %ptr.name,
                target = %change.name,
                "PTR record added"
            );
        }

        Ok(())
    }

    /// Removes every PTR in the reverse zone whose content is the change's name.
    #[instrument(skip(self, change), fields(name = %change.name, record_type = %change.record_type))]
    pub async fn del_reverse(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        if !change.record_type.is_address() {
            return Ok(());
        }

        let results = self
            .nameserver
            .search(
                server_id,
                decanonicalize(&change.name),
                self.max_search_results,
                SearchObjectType::Record,
            )
            .await?;

        for result in results.iter().filter(|r| r.is_ptr()) {
            let stale = ResourceRecordChange {
                name: result.name.clone(),
                record_type: RecordType::PTR,
                ttl: 0,
                changetype: ChangeType::Delete,
                records: Vec::new(),
            };
            self.nameserver
                .remove_record_set(server_id, &self.reverse_zone, &stale)
                .await?;

            info!(
                zone = %zone_id,
                ptr = %result.name,
                target = %result.content,
                "PTR record removed"
            );
        }

        Ok(())
    }
}

fn with_content(error: DomainError, content: &str) -> DomainError {
    match error {
        DomainError::UpstreamDns(msg) => {
            DomainError::UpstreamDns(format!("adding PTR for {}: {}", content, msg))
        }
        other => other,
    }
}
