//! # courtside_api
//!
//! HTTP API library for Courtside.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use courtside_core::auth::jwt::JwtKeys;
use courtside_core::store::{ClubStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, inventory, staff};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Staff and inventory records.
    pub club: Arc<dyn ClubStore>,
    /// Signing keys, derived once from `config.jwt_secret`.
    pub jwt: Arc<JwtKeys>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Build state around a single store implementing both traits.
    pub fn new<S>(store: Arc<S>, config: ApiConfig) -> Self
    where
        S: UserStore + ClubStore + 'static,
    {
        Self {
            users: store.clone(),
            club: store,
            jwt: Arc::new(JwtKeys::new(config.jwt_secret.as_bytes())),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_REFRESH, post(auth::refresh_handler))
        .route(routes::POST_AUTH_LOGOUT, post(auth::logout_handler));

    // Protected routes (require a bearer access token)
    let protected = Router::new()
        .route(routes::GET_AUTH_ME, get(auth::me_handler))
        .route(
            routes::API_STAFF,
            get(staff::list_staff_handler).post(staff::create_staff_handler),
        )
        .route(
            routes::API_STAFF_ID,
            put(staff::update_staff_handler).delete(staff::delete_staff_handler),
        )
        .route(
            routes::API_INVENTORY,
            get(inventory::list_inventory_handler).post(inventory::create_inventory_handler),
        )
        .route(
            routes::API_INVENTORY_ID,
            put(inventory::update_inventory_handler).delete(inventory::delete_inventory_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
