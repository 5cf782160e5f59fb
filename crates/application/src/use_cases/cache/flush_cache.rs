use std::sync::Arc;
use tracing::{info, instrument};
use zonesync_domain::name::decanonicalize;
use zonesync_domain::{DomainError, FlushResult};

use crate::ports::CacheFlusher;

pub const FLUSHED_MESSAGE: &str = "Flushed cache.";

/// Drops one name from the local authoritative and recursor caches.
pub struct FlushCacheUseCase {
    authoritative: Arc<dyn CacheFlusher>,
    recursor: Arc<dyn CacheFlusher>,
}

impl FlushCacheUseCase {
    pub fn new(authoritative: Arc<dyn CacheFlusher>, recursor: Arc<dyn CacheFlusher>) -> Self {
        Self {
            authoritative,
            recursor,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, server_id: &str, domain: &str) -> Result<FlushResult, DomainError> {
        if domain.trim().is_empty() {
            return Err(DomainError::InvalidInput("domain is required".to_string()));
        }

        let auth = self.authoritative.flush_cache(server_id, domain).await?;
        let rec = self.recursor.flush_cache(server_id, domain).await?;

        let count = auth.count + rec.count;
        info!(rr = %decanonicalize(domain), count = count, "Cache flushed");

        Ok(FlushResult {
            count,
            result: FLUSHED_MESSAGE.to_string(),
        })
    }
}
