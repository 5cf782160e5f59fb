use std::sync::Arc;
use zonesync_application::ports::AccessPolicy;
use zonesync_application::use_cases::{
    CreateForwardZonesUseCase, DeleteForwardZonesUseCase, FlushCacheUseCase,
    FlushFleetCacheUseCase, GetForwardZonesUseCase, PatchZoneUseCase, RemoveForwardZonesUseCase,
    ReplaceForwardZoneUseCase, StoreForwardZonesUseCase, UpdateForwardZoneUseCase,
};
use zonesync_domain::Role;

#[derive(Clone)]
pub struct AppState {
    pub local: LocalUseCases,
    pub fleet: FleetUseCases,
    pub access: Arc<dyn AccessPolicy>,
    pub role: Role,
}

/// Mutations applied to this node only; reached through the internal API.
#[derive(Clone)]
pub struct LocalUseCases {
    pub get_forward_zones: Arc<GetForwardZonesUseCase>,
    pub store_forward_zones: Arc<StoreForwardZonesUseCase>,
    pub remove_forward_zones: Arc<RemoveForwardZonesUseCase>,
    pub replace_forward_zone: Arc<ReplaceForwardZoneUseCase>,
    pub flush_cache: Arc<FlushCacheUseCase>,
}

/// Mutations broadcast to every healthy peer.
#[derive(Clone)]
pub struct FleetUseCases {
    pub create_forward_zones: Arc<CreateForwardZonesUseCase>,
    pub update_forward_zone: Arc<UpdateForwardZoneUseCase>,
    pub delete_forward_zones: Arc<DeleteForwardZonesUseCase>,
    pub patch_zone: Arc<PatchZoneUseCase>,
    pub flush_cache: Arc<FlushFleetCacheUseCase>,
}
