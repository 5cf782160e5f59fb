use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;
use zonesync_application::ports::{AccessAction, AccessPolicy};
use zonesync_domain::config::AccessConfig;
use zonesync_domain::DomainError;

/// Allow-list of caller UIDs read from configuration. Every listed UID may
/// replace and delete in every zone.
pub struct StaticAccessPolicy {
    enabled: bool,
    allowed: HashSet<String>,
}

impl StaticAccessPolicy {
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            enabled: config.enabled,
            allowed: config.allowed_uids.iter().cloned().collect(),
        }
    }
}

#[async_trait]
impl AccessPolicy for StaticAccessPolicy {
    async fn authorize(
        &self,
        uid: &str,
        action: AccessAction,
        zone: &str,
    ) -> Result<bool, DomainError> {
        let allowed = !self.enabled || self.allowed.contains(uid);
        debug!(uid = %uid, action = %action, zone = %zone, allowed, "Access decision");
        Ok(allowed)
    }
}
