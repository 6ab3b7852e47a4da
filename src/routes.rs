use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_user};
use crate::state::AppState;

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Public
        .merge(service_routes())
        .merge(restaurant_routes(&state))
        .merge(auth_routes())
        // Protected
        .merge(review_routes(&state))
        .merge(bookmark_routes(&state))
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Any origin when none are configured, otherwise exactly the configured list.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn service_routes() -> Router<AppState> {
    use public::service;

    Router::new()
        .route("/", get(service::root))
        .route("/health", get(service::health))
}

fn restaurant_routes(state: &AppState) -> Router<AppState> {
    use public::restaurants;

    let reads = Router::new()
        .route("/restaurants", get(restaurants::list))
        .route("/restaurants/filter", get(restaurants::filter))
        .route("/restaurants/cuisine/:cuisine", get(restaurants::by_cuisine))
        .route("/restaurants/diet/:diet", get(restaurants::by_diet))
        .route("/restaurants/location/:location", get(restaurants::by_location))
        .route("/restaurants/:id", get(restaurants::show))
        .route("/cuisines", get(restaurants::cuisines))
        .route("/dietary-preferences", get(restaurants::dietary_preferences));

    let writes = Router::new()
        .route("/restaurants", post(protected::restaurants::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    reads.merge(writes)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn review_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/reviews", post(protected::reviews::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user))
}

fn bookmark_routes(state: &AppState) -> Router<AppState> {
    use protected::bookmarks;

    Router::new()
        .route("/bookmarks", get(bookmarks::list).post(bookmarks::create))
        .route("/bookmarks/:restaurant_id", delete(bookmarks::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user))
}
