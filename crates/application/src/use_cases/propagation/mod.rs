mod create_forward_zones;
mod delete_forward_zones;
mod update_forward_zone;

pub use create_forward_zones::CreateForwardZonesUseCase;
pub use delete_forward_zones::DeleteForwardZonesUseCase;
pub use update_forward_zone::UpdateForwardZoneUseCase;
