/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```
/// use accounts_api::{app::{build_router, AppState}, config::Config};
///
/// let state = AppState::in_memory(Config::in_memory());
/// let app = build_router(state);
/// ```

use crate::config::Config;
use accounts_shared::{
    repository::{memory::MemoryStore, AddressRepository, UserRepository},
    services::{AddressService, UserService},
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// User account operations
    pub users: UserService,

    /// Shipping address operations
    pub addresses: AddressService,

    /// Storage handle used by the health probe
    pub storage: Arc<dyn UserRepository>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over the given storage ports
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        addresses: Arc<dyn AddressRepository>,
    ) -> Self {
        Self {
            users: UserService::new(users.clone()),
            addresses: AddressService::new(users.clone(), addresses),
            storage: users,
            config: Arc::new(config),
        }
    }

    /// Creates application state over a fresh in-memory store
    pub fn in_memory(config: Config) -> Self {
        let store = MemoryStore::new();
        Self::new(config, Arc::new(store.clone()), Arc::new(store))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                   # Health check
/// └── /api/v1/
///     └── /users
///         ├── POST   /                          # Create user
///         ├── GET    /                          # List users
///         ├── GET    /:rut                      # Get user
///         ├── PUT    /:rut                      # Update names
///         ├── DELETE /:rut                      # Delete user and addresses
///         └── /:rut/addresses
///             ├── POST   /                      # Add address
///             ├── GET    /                      # List addresses
///             ├── GET    /:address_id           # Get address
///             ├── PUT    /:address_id           # Update address
///             └── DELETE /:address_id           # Delete address
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/:rut",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route(
            "/:rut/addresses",
            get(routes::addresses::list_addresses).post(routes::addresses::add_address),
        )
        .route(
            "/:rut/addresses/:address_id",
            get(routes::addresses::get_address)
                .put(routes::addresses::update_address)
                .delete(routes::addresses::delete_address),
        );

    let v1_routes = Router::new().nest("/users", user_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .expose_headers([header::LOCATION])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
