//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use notehub_auth::{AuthService, TokenVerifier};
use notehub_core::config::AppConfig;
use notehub_entity::store::{NoteStore, OrganizationStore, RoleStore, UserStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks. Stores are held as trait
/// objects so tests can swap the PostgreSQL repositories for in-memory
/// implementations.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    /// Session lifecycle orchestration.
    pub auth: Arc<AuthService>,
    /// Token decoder for the session-validation middleware.
    pub verifier: Arc<TokenVerifier>,

    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Organization store.
    pub organizations: Arc<dyn OrganizationStore>,
    /// Role store, consulted on every permission check.
    pub roles: Arc<dyn RoleStore>,
    /// Note store.
    pub notes: Arc<dyn NoteStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
