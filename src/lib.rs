pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenCodec;

/// Shared per-request resources: the connection pool and the token codec,
/// both constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenCodec>,
}

pub fn app(state: AppState) -> Router {
    let router = public_routes()
        .merge(protected_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config::config().security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    // Collection paths also answer with a trailing slash
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/auth/login", post(handlers::auth::login_post))
        .route("/posts", get(handlers::posts::list))
        .route("/posts/", get(handlers::posts::list))
        .route("/posts/:id", get(handlers::posts::get))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::posts::create))
        .route("/posts/", post(handlers::posts::create))
        .route(
            "/posts/:id",
            put(handlers::posts::update)
                .patch(handlers::posts::update)
                .delete(handlers::posts::delete),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::jwt_auth_middleware,
        ))
}
