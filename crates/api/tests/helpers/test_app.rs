use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use zonesync_api::{create_internal_routes, create_public_routes, AppState, FleetUseCases, LocalUseCases};
use zonesync_application::ports::AccessAction;
use zonesync_application::services::{
    CompositeForwardZoneWriter, FanOutPropagator, ForwardZoneStore, PropagatorSettings,
    ReverseRecordSynchronizer,
};
use zonesync_application::use_cases::*;
use zonesync_domain::{ForwardZone, ForwardZoneSet, Role, ServiceIdentity};

use super::mock_ports::*;

pub const SERVICE: &str = "pdns-api";
pub const OPERATOR: &str = "ops";
pub const READER: &str = "auditor";

pub fn zones(entries: &[(&str, &[&str])]) -> ForwardZoneSet {
    entries
        .iter()
        .map(|(name, ns)| ForwardZone::new(name, ns.iter().map(|s| s.to_string()).collect()))
        .collect()
}

pub struct TestApp {
    pub public: Router,
    pub internal: Router,
    pub zones: MemoryZones,
    pub fleet: RecordingFleet,
    pub nameserver: RecordingNameserver,
}

impl TestApp {
    pub fn new(role: Role) -> Self {
        let zones = MemoryZones::default();
        let fleet = RecordingFleet::default();
        let nameserver = RecordingNameserver::default();

        let store = Arc::new(ForwardZoneStore::new(
            Arc::new(zones.clone()),
            Arc::new(CompositeForwardZoneWriter::new(vec![Arc::new(zones.clone())])),
        ));
        let propagator = Arc::new(FanOutPropagator::new(
            Arc::new(fleet.clone()),
            Arc::new(fleet.clone()),
            PropagatorSettings {
                identity: ServiceIdentity::new("consul", "default", "dc1", "pdns-api-internal"),
                internal_port: 8090,
                peer_timeout: Duration::from_secs(2),
                max_in_flight: 4,
            },
        ));
        let reverse = Arc::new(ReverseRecordSynchronizer::new(
            Arc::new(nameserver.clone()),
            "10.in-addr.arpa.",
            10,
        ));

        let state = AppState {
            local: LocalUseCases {
                get_forward_zones: Arc::new(GetForwardZonesUseCase::new(store.clone())),
                store_forward_zones: Arc::new(StoreForwardZonesUseCase::new(store.clone())),
                remove_forward_zones: Arc::new(RemoveForwardZonesUseCase::new(store.clone())),
                replace_forward_zone: Arc::new(ReplaceForwardZoneUseCase::new(store.clone())),
                flush_cache: Arc::new(FlushCacheUseCase::new(
                    Arc::new(FixedCacheFlusher::new(2)),
                    Arc::new(FixedCacheFlusher::new(5)),
                )),
            },
            fleet: FleetUseCases {
                create_forward_zones: Arc::new(CreateForwardZonesUseCase::new(
                    store.clone(),
                    propagator.clone(),
                    SERVICE,
                )),
                update_forward_zone: Arc::new(UpdateForwardZoneUseCase::new(
                    propagator.clone(),
                    SERVICE,
                )),
                delete_forward_zones: Arc::new(DeleteForwardZonesUseCase::new(
                    store.clone(),
                    propagator.clone(),
                    SERVICE,
                )),
                patch_zone: Arc::new(PatchZoneUseCase::new(
                    Arc::new(nameserver.clone()),
                    reverse,
                    propagator.clone(),
                    SERVICE,
                )),
                flush_cache: Arc::new(FlushFleetCacheUseCase::new(propagator, SERVICE)),
            },
            access: Arc::new(AllowList::new(
                &[OPERATOR],
                &[AccessAction::Replace, AccessAction::Delete],
            )),
            role,
        };

        Self {
            public: create_public_routes(state.clone()),
            internal: create_internal_routes(state),
            zones,
            fleet,
            nameserver,
        }
    }
}

pub fn request(method: &str, uri: &str, uid: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(uid) = uid {
        builder = builder.header("X-PDNS-Client-UID", uid);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (u16, Value) {
    let response: Response<Body> = router.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
