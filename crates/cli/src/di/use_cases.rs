use std::sync::Arc;
use zonesync_api::{AppState, FleetUseCases, LocalUseCases};
use zonesync_application::services::{
    FanOutPropagator, ForwardZoneStore, PropagatorSettings, ReverseRecordSynchronizer,
};
use zonesync_application::use_cases::{
    CreateForwardZonesUseCase, DeleteForwardZonesUseCase, FlushCacheUseCase,
    FlushFleetCacheUseCase, GetForwardZonesUseCase, PatchZoneUseCase, RemoveForwardZonesUseCase,
    ReplaceForwardZoneUseCase, StoreForwardZonesUseCase, UpdateForwardZoneUseCase,
};
use zonesync_domain::Config;
use zonesync_infrastructure::consul::ConsulClient;
use zonesync_infrastructure::transport::TlsMaterial;

use super::Adapters;

pub struct Services {
    pub state: AppState,
    pub consul: Arc<ConsulClient>,
    pub tls: Arc<TlsMaterial>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let adapters = Adapters::new(config)?;
        let service = config.consul.service_name.clone();

        let store = Arc::new(ForwardZoneStore::new(
            adapters.zone_source.clone(),
            adapters.zone_writer.clone(),
        ));

        let propagator = Arc::new(FanOutPropagator::new(
            adapters.directory.clone(),
            adapters.transport.clone(),
            PropagatorSettings {
                identity: config.consul.internal_identity(),
                internal_port: config.internal_http.port,
                peer_timeout: config.backend_timeout(),
                max_in_flight: config.forward_zones.max_in_flight,
            },
        ));

        let reverse = Arc::new(ReverseRecordSynchronizer::new(
            adapters.nameserver(),
            config.forward_zones.reverse_zone.clone(),
            config.forward_zones.max_search_results,
        ));

        let local = LocalUseCases {
            get_forward_zones: Arc::new(GetForwardZonesUseCase::new(store.clone())),
            store_forward_zones: Arc::new(StoreForwardZonesUseCase::new(store.clone())),
            remove_forward_zones: Arc::new(RemoveForwardZonesUseCase::new(store.clone())),
            replace_forward_zone: Arc::new(ReplaceForwardZoneUseCase::new(store.clone())),
            flush_cache: Arc::new(FlushCacheUseCase::new(
                adapters.authoritative_cache(),
                adapters.recursor.clone(),
            )),
        };

        let fleet = FleetUseCases {
            create_forward_zones: Arc::new(CreateForwardZonesUseCase::new(
                store.clone(),
                propagator.clone(),
                service.clone(),
            )),
            update_forward_zone: Arc::new(UpdateForwardZoneUseCase::new(
                propagator.clone(),
                service.clone(),
            )),
            delete_forward_zones: Arc::new(DeleteForwardZonesUseCase::new(
                store,
                propagator.clone(),
                service.clone(),
            )),
            patch_zone: Arc::new(PatchZoneUseCase::new(
                adapters.nameserver(),
                reverse,
                propagator.clone(),
                service.clone(),
            )),
            flush_cache: Arc::new(FlushFleetCacheUseCase::new(propagator, service)),
        };

        Ok(Self {
            state: AppState {
                local,
                fleet,
                access: adapters.access.clone(),
                role: config.role,
            },
            consul: adapters.consul,
            tls: adapters.tls,
        })
    }
}
