use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use zonesync_application::ports::{
    AccessAction, AccessPolicy, AuthoritativeNameserver, CacheFlusher, ForwardZoneSource,
    ForwardZoneWriter, PeerTransport, ServiceDirectory,
};
use zonesync_domain::{
    DomainError, FlushResult, ForwardZoneSet, PropagationRequest, ResourceRecordChange,
    SearchObjectType, SearchResult, ServiceIdentity, ServiceInstance,
};

// ── Forward-zone file ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryZones {
    zones: Arc<RwLock<ForwardZoneSet>>,
}

impl MemoryZones {
    pub async fn seed(&self, zones: ForwardZoneSet) {
        *self.zones.write().await = zones;
    }

    pub async fn snapshot(&self) -> ForwardZoneSet {
        self.zones.read().await.clone()
    }
}

#[async_trait]
impl ForwardZoneSource for MemoryZones {
    async fn load(&self) -> Result<ForwardZoneSet, DomainError> {
        Ok(self.zones.read().await.clone())
    }
}

#[async_trait]
impl ForwardZoneWriter for MemoryZones {
    fn name(&self) -> &str {
        "memory"
    }

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError> {
        *self.zones.write().await = zones.clone();
        Ok(())
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// Directory and transport in one: lists the configured peers and records
/// every request sent to them.
#[derive(Clone, Default)]
pub struct RecordingFleet {
    peers: Arc<RwLock<Vec<ServiceInstance>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    sent: Arc<RwLock<Vec<(ServiceInstance, PropagationRequest)>>>,
}

impl RecordingFleet {
    pub async fn set_peers(&self, addresses: &[&str]) {
        *self.peers.write().await = addresses
            .iter()
            .map(|a| ServiceInstance::new(*a, 8080))
            .collect();
    }

    pub async fn fail_peer(&self, address: &str) {
        self.failing.write().await.insert(address.to_string());
    }

    pub async fn sent(&self) -> Vec<(ServiceInstance, PropagationRequest)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl ServiceDirectory for RecordingFleet {
    async fn healthy_instances(&self, _service: &str) -> Result<Vec<ServiceInstance>, DomainError> {
        Ok(self.peers.read().await.clone())
    }
}

#[async_trait]
impl PeerTransport for RecordingFleet {
    async fn send(
        &self,
        peer: &ServiceInstance,
        _expected: &ServiceIdentity,
        request: &PropagationRequest,
    ) -> Result<(), DomainError> {
        self.sent.write().await.push((peer.clone(), request.clone()));
        if self.failing.read().await.contains(&peer.address) {
            return Err(DomainError::RemoteApply {
                peer: peer.authority(),
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

// ── PowerDNS ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingNameserver {
    changes: Arc<RwLock<Vec<(String, ResourceRecordChange)>>>,
}

impl RecordingNameserver {
    pub async fn changes(&self) -> Vec<(String, ResourceRecordChange)> {
        self.changes.read().await.clone()
    }
}

#[async_trait]
impl AuthoritativeNameserver for RecordingNameserver {
    async fn add_record_set(
        &self,
        _server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        self.changes
            .write()
            .await
            .push((zone_id.to_string(), change.clone()));
        Ok(())
    }

    async fn remove_record_set(
        &self,
        _server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        self.changes
            .write()
            .await
            .push((zone_id.to_string(), change.clone()));
        Ok(())
    }

    async fn search(
        &self,
        _server_id: &str,
        _query: &str,
        _max_results: usize,
        _object_type: SearchObjectType,
    ) -> Result<Vec<SearchResult>, DomainError> {
        Ok(Vec::new())
    }
}

pub struct FixedCacheFlusher {
    count: u64,
}

impl FixedCacheFlusher {
    pub fn new(count: u64) -> Self {
        Self { count }
    }
}

#[async_trait]
impl CacheFlusher for FixedCacheFlusher {
    async fn flush_cache(&self, _server_id: &str, _domain: &str) -> Result<FlushResult, DomainError> {
        Ok(FlushResult {
            count: self.count,
            result: "Flushed cache.".to_string(),
        })
    }
}

// ── Access ────────────────────────────────────────────────────────────────────

/// Allows only the listed UIDs, and only for the listed actions.
pub struct AllowList {
    uids: HashSet<String>,
    actions: Vec<AccessAction>,
}

impl AllowList {
    pub fn new(uids: &[&str], actions: &[AccessAction]) -> Self {
        Self {
            uids: uids.iter().map(|s| s.to_string()).collect(),
            actions: actions.to_vec(),
        }
    }
}

#[async_trait]
impl AccessPolicy for AllowList {
    async fn authorize(
        &self,
        uid: &str,
        action: AccessAction,
        _zone: &str,
    ) -> Result<bool, DomainError> {
        Ok(self.uids.contains(uid) && self.actions.contains(&action))
    }
}
