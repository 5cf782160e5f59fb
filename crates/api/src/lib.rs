pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::{create_internal_routes, create_public_routes};
pub use state::{AppState, FleetUseCases, LocalUseCases};
