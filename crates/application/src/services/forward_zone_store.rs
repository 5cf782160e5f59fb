use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use zonesync_domain::{DomainError, ForwardZoneSet};

use crate::ports::{ForwardZoneSource, ForwardZoneWriter};

/// Read-modify-write access to the local forward-zone set.
///
/// Mutations in this process are serialized by a single async mutex, so two
/// overlapping requests against the same worker cannot lose each other's
/// update. Writers outside the process are not coordinated.
pub struct ForwardZoneStore {
    source: Arc<dyn ForwardZoneSource>,
    writer: Arc<dyn ForwardZoneWriter>,
    write_lock: Mutex<()>,
}

impl ForwardZoneStore {
    pub fn new(source: Arc<dyn ForwardZoneSource>, writer: Arc<dyn ForwardZoneWriter>) -> Self {
        Self {
            source,
            writer,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> Result<ForwardZoneSet, DomainError> {
        self.source.load().await
    }

    /// Loads the current set, applies `change` and writes the result to every
    /// backend. Nothing is written when `change` fails.
    pub async fn modify<F>(&self, change: F) -> Result<ForwardZoneSet, DomainError>
    where
        F: FnOnce(ForwardZoneSet) -> Result<ForwardZoneSet, DomainError> + Send,
    {
        let _guard = self.write_lock.lock().await;

        let current = self.source.load().await?;
        let before = current.len();
        let updated = change(current)?;

        self.writer.save(&updated).await?;
        debug!(before = before, after = updated.len(), "Forward-zone set saved");
        Ok(updated)
    }
}
