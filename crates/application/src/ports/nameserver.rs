use async_trait::async_trait;
use zonesync_domain::{
    DomainError, FlushResult, ResourceRecordChange, SearchObjectType, SearchResult,
};

#[async_trait]
pub trait AuthoritativeNameserver: Send + Sync {
    async fn add_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError>;

    async fn remove_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError>;

    async fn search(
        &self,
        server_id: &str,
        query: &str,
        max_results: usize,
        object_type: SearchObjectType,
    ) -> Result<Vec<SearchResult>, DomainError>;
}

#[async_trait]
pub trait CacheFlusher: Send + Sync {
    async fn flush_cache(&self, server_id: &str, domain: &str) -> Result<FlushResult, DomainError>;
}
