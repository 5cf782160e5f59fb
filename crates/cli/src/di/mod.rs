mod adapters;
mod use_cases;

pub use adapters::Adapters;
pub use use_cases::Services;
