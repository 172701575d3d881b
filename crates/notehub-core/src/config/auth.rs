//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// The three secrets are secret *names*, resolved through the secret
/// cache at startup. Leaving a name empty makes bootstrap fail loudly
/// rather than signing with a blank key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the access-token signing secret (HMAC-SHA256).
    #[serde(default = "default_access_secret_name")]
    pub access_token_secret_name: String,
    /// Name of the refresh-token signing secret.
    #[serde(default = "default_refresh_secret_name")]
    pub refresh_token_secret_name: String,
    /// Name of the static password-hash secret.
    #[serde(default = "default_password_secret_name")]
    pub password_secret_name: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret_name: default_access_secret_name(),
            refresh_token_secret_name: default_refresh_secret_name(),
            password_secret_name: default_password_secret_name(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
        }
    }
}

fn default_access_secret_name() -> String {
    "ACCESS_TOKEN_SECRET".to_string()
}

fn default_refresh_secret_name() -> String {
    "REFRESH_TOKEN_SECRET".to_string()
}

fn default_password_secret_name() -> String {
    "PASSWORD_SALT".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    30
}
