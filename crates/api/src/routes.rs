use crate::handlers;
use crate::middleware::require_client_uid;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::any;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use zonesync_domain::peer::INTERNAL_PREFIX;
use zonesync_domain::Role;

/// Public listener. Every role answers health, version and reads; only the
/// API role accepts mutations.
pub fn create_public_routes(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(handlers::system::routes())
        .merge(handlers::forward_zones::read_routes());

    if state.role == Role::Api {
        let mutations = Router::new()
            .merge(handlers::forward_zones::mutation_routes())
            .merge(handlers::zones::routes())
            .merge(handlers::cache::routes())
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_client_uid,
            ));
        api = api.merge(mutations);
    } else {
        // Forward-zone paths already answer 405 through their read routes.
        api = api
            .route("/servers/{server_id}/zones/{zone_id}", any(mutation_not_allowed))
            .route("/servers/{server_id}/cache/flush", any(mutation_not_allowed));
    }

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn mutation_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// Internal listener, served behind mutual TLS. Peers only ever reach it
/// with propagated mutations.
pub fn create_internal_routes(state: AppState) -> Router {
    Router::new()
        .nest(INTERNAL_PREFIX, handlers::internal::routes())
        .nest("/api/v1", handlers::system::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
