pub mod cache;
pub mod forward_zones;
pub mod propagation;
pub mod zones;

pub use cache::{FlushCacheUseCase, FlushFleetCacheUseCase, FLUSHED_MESSAGE};
pub use forward_zones::{
    GetForwardZonesUseCase, RemoveForwardZonesUseCase, ReplaceForwardZoneUseCase,
    StoreForwardZonesUseCase,
};
pub use propagation::{
    CreateForwardZonesUseCase, DeleteForwardZonesUseCase, UpdateForwardZoneUseCase,
};
pub use zones::PatchZoneUseCase;
