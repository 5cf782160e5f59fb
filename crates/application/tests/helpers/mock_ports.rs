#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use zonesync_application::ports::{
    AuthoritativeNameserver, CacheFlusher, ForwardZoneSource, ForwardZoneWriter, PeerTransport,
    ServiceDirectory,
};
use zonesync_application::services::{
    CompositeForwardZoneWriter, FanOutPropagator, ForwardZoneStore, PropagatorSettings,
};
use zonesync_application::use_cases::{
    RemoveForwardZonesUseCase, ReplaceForwardZoneUseCase, StoreForwardZonesUseCase,
};
use zonesync_domain::name::{decanonicalize, names_equal};
use zonesync_domain::{
    DomainError, FlushResult, ForwardZone, ForwardZoneSet, HttpMethod, PropagationRequest,
    ResourceRecordChange, SearchObjectType, SearchResult, ServiceIdentity, ServiceInstance,
};

pub const INTERNAL_PORT: u16 = 8090;

pub fn zone(name: &str, nameservers: &[&str]) -> ForwardZone {
    ForwardZone::new(name, nameservers.iter().map(|s| s.to_string()).collect())
}

pub fn identity() -> ServiceIdentity {
    ServiceIdentity::new("consul", "default", "dc1", "pdns-api-internal")
}

// ── Forward-zone backend ──────────────────────────────────────────────────────

/// In-memory file: source and writer over the same set.
#[derive(Clone)]
pub struct MockZoneBackend {
    name: String,
    zones: Arc<RwLock<ForwardZoneSet>>,
    saves: Arc<AtomicUsize>,
    should_fail: Arc<RwLock<bool>>,
    yield_on_io: bool,
}

impl MockZoneBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            zones: Arc::new(RwLock::new(ForwardZoneSet::new())),
            saves: Arc::new(AtomicUsize::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
            yield_on_io: false,
        }
    }

    /// Yields to the scheduler inside load and save so concurrent callers
    /// interleave.
    pub fn interleaving(name: &str) -> Self {
        Self {
            yield_on_io: true,
            ..Self::new(name)
        }
    }

    pub async fn with_zones(self, zones: Vec<ForwardZone>) -> Self {
        *self.zones.write().await = zones.into_iter().collect();
        self
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn zones(&self) -> ForwardZoneSet {
        self.zones.read().await.clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForwardZoneSource for MockZoneBackend {
    async fn load(&self) -> Result<ForwardZoneSet, DomainError> {
        if self.yield_on_io {
            tokio::task::yield_now().await;
        }
        Ok(self.zones.read().await.clone())
    }
}

#[async_trait]
impl ForwardZoneWriter for MockZoneBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.yield_on_io {
            tokio::task::yield_now().await;
        }
        if *self.should_fail.read().await {
            return Err(DomainError::BackendWrite(format!("{} is read-only", self.name)));
        }
        *self.zones.write().await = zones.clone();
        Ok(())
    }
}

pub fn store_over(backend: &MockZoneBackend) -> Arc<ForwardZoneStore> {
    Arc::new(ForwardZoneStore::new(
        Arc::new(backend.clone()),
        Arc::new(CompositeForwardZoneWriter::new(vec![Arc::new(backend.clone())])),
    ))
}

// ── Service directory ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockServiceDirectory {
    instances: Arc<RwLock<Vec<ServiceInstance>>>,
    should_fail: Arc<RwLock<bool>>,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl MockServiceDirectory {
    pub fn new() -> Self {
        Self {
            instances: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
            lookups: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_instances(&self, instances: Vec<ServiceInstance>) {
        *self.instances.write().await = instances;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

impl Default for MockServiceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceDirectory for MockServiceDirectory {
    async fn healthy_instances(&self, service: &str) -> Result<Vec<ServiceInstance>, DomainError> {
        self.lookups.write().await.push(service.to_string());
        if *self.should_fail.read().await {
            return Err(DomainError::DirectoryUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(self.instances.read().await.clone())
    }
}

// ── Peer fleet ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum PeerBehavior {
    Apply,
    Reject(u16),
    Hang(Duration),
    WrongIdentity,
}

struct MockPeer {
    backend: MockZoneBackend,
    store: Arc<ForwardZoneStore>,
    behavior: PeerBehavior,
}

/// Peers keyed by `address:port`, each applying requests to its own store
/// the way the internal API would.
#[derive(Clone)]
pub struct MockPeerFleet {
    peers: Arc<RwLock<HashMap<String, MockPeer>>>,
    received: Arc<RwLock<Vec<(String, PropagationRequest)>>>,
    expected: ServiceIdentity,
}

impl MockPeerFleet {
    pub fn new() -> Self {
        Self {
            peers: Arc::new(RwLock::new(HashMap::new())),
            received: Arc::new(RwLock::new(Vec::new())),
            expected: identity(),
        }
    }

    /// Registers a peer and returns the directory entry pointing at its
    /// public port.
    pub async fn add_peer(&self, address: &str, behavior: PeerBehavior) -> ServiceInstance {
        let backend = MockZoneBackend::new(address);
        let peer = MockPeer {
            store: store_over(&backend),
            backend,
            behavior,
        };
        let key = ServiceInstance::new(address, INTERNAL_PORT).to_string();
        self.peers.write().await.insert(key, peer);
        ServiceInstance::new(address, 8080)
    }

    pub async fn zones_of(&self, address: &str) -> ForwardZoneSet {
        let key = ServiceInstance::new(address, INTERNAL_PORT).to_string();
        match self.peers.read().await.get(&key) {
            Some(peer) => peer.backend.zones().await,
            None => ForwardZoneSet::new(),
        }
    }

    pub async fn received(&self) -> Vec<(String, PropagationRequest)> {
        self.received.read().await.clone()
    }
}

impl Default for MockPeerFleet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PeerTransport for MockPeerFleet {
    async fn send(
        &self,
        peer: &ServiceInstance,
        expected: &ServiceIdentity,
        request: &PropagationRequest,
    ) -> Result<(), DomainError> {
        let key = peer.to_string();
        let (store, behavior) = {
            let peers = self.peers.read().await;
            let found = peers.get(&key).ok_or_else(|| DomainError::Transport {
                peer: key.clone(),
                message: "connection refused".to_string(),
            })?;
            (Arc::clone(&found.store), found.behavior.clone())
        };

        self.received
            .write()
            .await
            .push((key.clone(), request.clone()));

        match behavior {
            PeerBehavior::Apply => {}
            PeerBehavior::Reject(status) => {
                return Err(DomainError::RemoteApply {
                    peer: key,
                    status,
                    message: "rejected".to_string(),
                })
            }
            PeerBehavior::Hang(delay) => {
                tokio::time::sleep(delay).await;
            }
            PeerBehavior::WrongIdentity => {
                return Err(DomainError::IdentityMismatch {
                    peer: key,
                    expected: expected.uri(),
                })
            }
        }

        if expected != &self.expected {
            return Err(DomainError::IdentityMismatch {
                peer: key,
                expected: expected.uri(),
            });
        }

        apply_internal(&store, request).await
    }
}

async fn apply_internal(
    store: &Arc<ForwardZoneStore>,
    request: &PropagationRequest,
) -> Result<(), DomainError> {
    let body = request.body.as_deref().unwrap_or_default();
    let prefix = "/api/v1/internal/localhost/forward-zones";

    match (request.method, request.path.strip_prefix(prefix)) {
        (HttpMethod::Post, Some("")) => {
            StoreForwardZonesUseCase::new(Arc::clone(store))
                .execute(ForwardZoneSet::from_json(body)?)
                .await?;
        }
        (HttpMethod::Delete, Some("")) => {
            RemoveForwardZonesUseCase::new(Arc::clone(store))
                .execute(ForwardZoneSet::from_json(body)?)
                .await?;
        }
        (HttpMethod::Delete, Some(zone_id)) => {
            RemoveForwardZonesUseCase::new(Arc::clone(store))
                .execute_one(zone_id.trim_start_matches('/'))
                .await?;
        }
        (HttpMethod::Patch, Some(zone_id)) => {
            let zone: ForwardZone = serde_json_zone(body)?;
            ReplaceForwardZoneUseCase::new(Arc::clone(store))
                .execute(zone_id.trim_start_matches('/'), zone)
                .await?;
        }
        _ => {}
    }
    Ok(())
}

fn serde_json_zone(body: &[u8]) -> Result<ForwardZone, DomainError> {
    let mut wrapped = Vec::with_capacity(body.len() + 2);
    wrapped.push(b'[');
    wrapped.extend_from_slice(body);
    wrapped.push(b']');
    let set = ForwardZoneSet::from_json(&wrapped)?;
    set.into_vec()
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::InvalidInput("empty body".to_string()))
}

pub fn propagator(
    directory: &MockServiceDirectory,
    fleet: &MockPeerFleet,
    peer_timeout: Duration,
) -> Arc<FanOutPropagator> {
    Arc::new(FanOutPropagator::new(
        Arc::new(directory.clone()),
        Arc::new(fleet.clone()),
        PropagatorSettings {
            identity: identity(),
            internal_port: INTERNAL_PORT,
            peer_timeout,
            max_in_flight: 2,
        },
    ))
}

// ── Authoritative nameserver ──────────────────────────────────────────────────

/// Keeps rrsets per zone and answers searches by name or content the way
/// the search-data endpoint does.
#[derive(Clone)]
pub struct MockNameserver {
    rrsets: Arc<RwLock<Vec<(String, ResourceRecordChange)>>>,
    calls: Arc<RwLock<Vec<String>>>,
    fail_add_for: Arc<RwLock<Option<String>>>,
    fail_search: Arc<RwLock<bool>>,
}

impl MockNameserver {
    pub fn new() -> Self {
        Self {
            rrsets: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            fail_add_for: Arc::new(RwLock::new(None)),
            fail_search: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn seed(&self, zone: &str, rrset: ResourceRecordChange) {
        self.rrsets.write().await.push((zone.to_string(), rrset));
    }

    /// Fails any add whose rrset name matches.
    pub async fn fail_add_for(&self, name: &str) {
        *self.fail_add_for.write().await = Some(name.to_string());
    }

    pub async fn set_fail_search(&self, fail: bool) {
        *self.fail_search.write().await = fail;
    }

    pub async fn rrsets_in(&self, zone: &str) -> Vec<ResourceRecordChange> {
        self.rrsets
            .read()
            .await
            .iter()
            .filter(|(z, _)| names_equal(z, zone))
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// PTR records whose content is `target`.
    pub async fn ptrs_pointing_at(&self, target: &str) -> Vec<String> {
        self.rrsets
            .read()
            .await
            .iter()
            .filter(|(_, r)| r.record_type.as_str() == "PTR")
            .flat_map(|(_, r)| {
                r.records
                    .iter()
                    .filter(|rec| names_equal(&rec.content, target))
                    .map(|_| r.name.clone())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

impl Default for MockNameserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthoritativeNameserver for MockNameserver {
    async fn add_record_set(
        &self,
        _server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        self.calls
            .write()
            .await
            .push(format!("add {} {} {}", zone_id, change.name, change.record_type));

        if let Some(name) = self.fail_add_for.read().await.as_deref() {
            if names_equal(name, &change.name) {
                return Err(DomainError::UpstreamDns("422 Unprocessable Entity".to_string()));
            }
        }

        let mut rrsets = self.rrsets.write().await;
        rrsets.retain(|(z, r)| {
            !(names_equal(z, zone_id)
                && names_equal(&r.name, &change.name)
                && r.record_type == change.record_type)
        });
        rrsets.push((zone_id.to_string(), change.clone()));
        Ok(())
    }

    async fn remove_record_set(
        &self,
        _server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        self.calls
            .write()
            .await
            .push(format!("remove {} {} {}", zone_id, change.name, change.record_type));

        self.rrsets.write().await.retain(|(z, r)| {
            !(names_equal(z, zone_id)
                && names_equal(&r.name, &change.name)
                && r.record_type == change.record_type)
        });
        Ok(())
    }

    async fn search(
        &self,
        _server_id: &str,
        query: &str,
        max_results: usize,
        _object_type: SearchObjectType,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.calls.write().await.push(format!("search {}", query));

        if *self.fail_search.read().await {
            return Err(DomainError::UpstreamDns("search failed".to_string()));
        }

        let rrsets = self.rrsets.read().await;
        let mut results = Vec::new();
        for (zone, rrset) in rrsets.iter() {
            for record in &rrset.records {
                if names_equal(decanonicalize(&rrset.name), query)
                    || names_equal(decanonicalize(&record.content), query)
                {
                    results.push(SearchResult {
                        name: rrset.name.clone(),
                        record_type: rrset.record_type.as_str().to_lowercase(),
                        content: record.content.clone(),
                        zone: zone.clone(),
                        object_type: "record".to_string(),
                    });
                }
            }
        }
        results.truncate(max_results);
        Ok(results)
    }
}

// ── Cache flusher ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCacheFlusher {
    count: u64,
    flushed: Arc<RwLock<Vec<String>>>,
    should_fail: bool,
}

impl MockCacheFlusher {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            flushed: Arc::new(RwLock::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new(0)
        }
    }

    pub async fn flushed(&self) -> Vec<String> {
        self.flushed.read().await.clone()
    }
}

#[async_trait]
impl CacheFlusher for MockCacheFlusher {
    async fn flush_cache(&self, _server_id: &str, domain: &str) -> Result<FlushResult, DomainError> {
        if self.should_fail {
            return Err(DomainError::UpstreamDns("500 Internal Server Error".to_string()));
        }
        self.flushed.write().await.push(domain.to_string());
        Ok(FlushResult {
            count: self.count,
            result: "Flushed cache.".to_string(),
        })
    }
}
