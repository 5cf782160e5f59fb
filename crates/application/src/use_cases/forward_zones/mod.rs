mod get_forward_zones;
mod remove_forward_zones;
mod replace_forward_zone;
mod store_forward_zones;

pub use get_forward_zones::GetForwardZonesUseCase;
pub use remove_forward_zones::RemoveForwardZonesUseCase;
pub use replace_forward_zone::ReplaceForwardZoneUseCase;
pub use store_forward_zones::StoreForwardZonesUseCase;
