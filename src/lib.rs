use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod matcher;
pub mod middleware;

pub fn app() -> Router {
    Router::new()
        // Protected API
        .merge(sample_routes())
        .merge(wish_routes())
        .layer(axum::middleware::from_fn(
            middleware::auth::bearer_auth_middleware,
        ))
        // Probes stay reachable without credentials
        .merge(health_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn sample_routes() -> Router {
    use handlers::samples;

    Router::new()
        .route(
            "/v1/samples",
            get(samples::samples_get).post(samples::samples_post),
        )
        .route(
            "/v1/samples/:id",
            get(samples::sample_get)
                .patch(samples::sample_patch)
                .delete(samples::sample_delete),
        )
}

fn wish_routes() -> Router {
    use handlers::wishes;

    Router::new()
        .route(
            "/v1/wishes",
            get(wishes::wishes_get).post(wishes::wishes_post),
        )
        .route(
            "/v1/wishes/:id",
            get(wishes::wish_get)
                .patch(wishes::wish_patch)
                .delete(wishes::wish_delete),
        )
}

fn health_routes() -> Router {
    use handlers::health;

    Router::new()
        .route("/health/live", get(health::health_live))
        .route("/health/ready", get(health::health_ready))
}
