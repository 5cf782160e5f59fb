mod patch_zone;

pub use patch_zone::PatchZoneUseCase;
