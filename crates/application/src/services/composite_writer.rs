use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};
use zonesync_domain::{DomainError, ForwardZoneSet};

use crate::ports::ForwardZoneWriter;

/// Writes one logical change to every backend in registration order.
///
/// The first failing backend aborts the save and its error is returned;
/// backends after it are left untouched and backends before it are not
/// rolled back.
pub struct CompositeForwardZoneWriter {
    writers: Vec<Arc<dyn ForwardZoneWriter>>,
}

impl CompositeForwardZoneWriter {
    pub fn new(writers: Vec<Arc<dyn ForwardZoneWriter>>) -> Self {
        Self { writers }
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

#[async_trait]
impl ForwardZoneWriter for CompositeForwardZoneWriter {
    fn name(&self) -> &str {
        "composite"
    }

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError> {
        for writer in &self.writers {
            if let Err(e) = writer.save(zones).await {
                error!(backend = writer.name(), error = %e, "Forward-zone backend write failed");
                return Err(e);
            }
            debug!(backend = writer.name(), zones = zones.len(), "Forward zones written");
        }
        Ok(())
    }
}
