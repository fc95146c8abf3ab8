//! CRM Router
//!
//! Every route except `POST /login` sits behind the bearer token gate;
//! mutating customer and address routes additionally require the admin
//! role. The admin gate is a route layer applied before the token gate,
//! so the token gate always runs first.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::config::CrmConfig;
use crate::domain::repository::{AddressRepository, CustomerRepository, UserRepository};
use crate::infra::sqlite::SqliteCrmRepository;
use crate::presentation::handlers::{self, CrmAppState};
use crate::presentation::middleware::{self, AuthGateState};

/// Create the CRM router with the SQLite repository
pub fn crm_router(repo: SqliteCrmRepository, config: CrmConfig) -> Router {
    crm_router_generic(repo, config)
}

/// Create a generic CRM router for any repository implementation
pub fn crm_router_generic<R>(repo: R, config: CrmConfig) -> Router
where
    R: UserRepository + CustomerRepository + AddressRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);

    let state = CrmAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    let gate = AuthGateState { config };

    let admin_routes = Router::new()
        .route("/customers", post(handlers::create_customer::<R>))
        .route(
            "/customers/{id}",
            put(handlers::update_customer::<R>).delete(handlers::delete_customer::<R>),
        )
        .route(
            "/customers/{id}/addresses",
            post(handlers::add_address::<R>),
        )
        .route(
            "/customers/{id}/addresses/{address_id}",
            delete(handlers::delete_address::<R>),
        )
        .route_layer(axum::middleware::from_fn(middleware::require_admin));

    let authed_routes = Router::new()
        .route("/customers", get(handlers::list_customers::<R>))
        .route("/customers/{id}", get(handlers::get_customer::<R>))
        .route(
            "/customers/{id}/addresses",
            get(handlers::list_addresses::<R>),
        )
        .route(
            "/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        );

    authed_routes
        .merge(admin_routes)
        .route_layer(axum::middleware::from_fn(move |req, next| {
            let gate = gate.clone();
            async move { middleware::require_auth(gate, req, next).await }
        }))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
