use async_trait::async_trait;
use std::fmt;
use zonesync_domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    Replace,
    Delete,
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessAction::Replace => f.write_str("replace"),
            AccessAction::Delete => f.write_str("delete"),
        }
    }
}

#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn authorize(
        &self,
        uid: &str,
        action: AccessAction,
        zone: &str,
    ) -> Result<bool, DomainError>;
}
