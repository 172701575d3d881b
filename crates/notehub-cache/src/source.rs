//! Secret sources.

use async_trait::async_trait;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

/// Upstream provider of named secrets (environment, parameter store).
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch a secret by name. A missing or empty secret is an error;
    /// callers must never proceed with a blank key.
    async fn fetch(&self, name: &str) -> AppResult<String>;
}

/// Secret source backed by process environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretSource;

impl EnvSecretSource {
    /// Create a new environment-backed source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretSource for EnvSecretSource {
    async fn fetch(&self, name: &str) -> AppResult<String> {
        if name.is_empty() {
            return Err(AppError::dependency("No secret name supplied"));
        }

        match std::env::var(name) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(AppError::dependency(format!(
                "Secret `{name}` is not available"
            ))),
        }
    }
}
