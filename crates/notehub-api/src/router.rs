//! Route definitions for the NoteHub HTTP API.
//!
//! All routes are mounted under `/api`. Public routes (login, logout,
//! refresh, user creation, health) are reachable without a token; every
//! other route passes the session-validation middleware and then a
//! capability check.

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::middleware as axum_middleware;
use axum::middleware::Next;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/refresh/token", post(handlers::auth::refresh))
        .route("/user/create", post(handlers::user::create_user))
        .route("/health", get(handlers::health::health_check));

    let guarded = Router::new()
        .merge(session_only_routes())
        .merge(user_read_routes(&state))
        .merge(user_write_routes(&state))
        .merge(note_read_routes(&state))
        .merge(note_write_routes(&state))
        .merge(role_read_routes(&state))
        .merge(role_write_routes(&state))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::require_session,
        ));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", public.merge(guarded))
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Routes that require a session but no specific capability.
fn session_only_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route(
            "/users/password/change",
            put(handlers::user::change_password),
        )
}

fn user_read_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user));
    with_capabilities(routes, state, &["users.read"])
}

fn user_write_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new().route("/users/{id}", put(handlers::user::update_user));
    with_capabilities(routes, state, &["users.write"])
}

fn note_read_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/notes", get(handlers::note::list_notes))
        .route("/notes/{id}", get(handlers::note::get_note));
    with_capabilities(routes, state, &["notes.read"])
}

fn note_write_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/notes", post(handlers::note::create_note))
        .route("/notes/{id}", put(handlers::note::update_note))
        .route("/notes/{id}", delete(handlers::note::delete_note));
    with_capabilities(routes, state, &["notes.write"])
}

fn role_read_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new().route("/roles", get(handlers::role::list_roles));
    with_capabilities(routes, state, &["roles.read"])
}

fn role_write_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/roles", post(handlers::role::create_role))
        .route("/roles/{id}", put(handlers::role::update_role));
    with_capabilities(routes, state, &["roles.write"])
}

/// Guards a route group behind a capability check.
fn with_capabilities(
    routes: Router<AppState>,
    state: &AppState,
    required: &'static [&'static str],
) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        move |state: State<AppState>, request: Request, next: Next| async move {
            middleware::permission::require_capabilities(state, required, request, next).await
        },
    ))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
