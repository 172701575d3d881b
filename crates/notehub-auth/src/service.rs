//! Session lifecycle: login, logout, refresh, registration, password
//! change.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::{OrgId, RoleId, UserId};
use notehub_entity::organization::Organization;
use notehub_entity::store::{OrganizationStore, RefreshTokenStore, UserStore};
use notehub_entity::user::{NewUser, User, UserProfile};

use crate::password::CredentialHasher;
use crate::token::{Identity, TokenIssuer, TokenPair, TokenVerifier};

/// Successful login payload: the token pair plus the client-safe profile.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Issued access + refresh pair.
    pub token: TokenPair,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Orchestrates the credential and token components over the stores.
///
/// Authentication outcomes are deliberately coarse: a failed login is
/// `Ok(None)` whether the email is unknown or the password is wrong, and
/// every refresh-token defect maps to the same invalid-token error.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    organizations: Arc<dyn OrganizationStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    hasher: Arc<CredentialHasher>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        organizations: Arc<dyn OrganizationStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        hasher: Arc<CredentialHasher>,
    ) -> Self {
        Self {
            users,
            organizations,
            refresh_tokens,
            issuer,
            verifier,
            hasher,
        }
    }

    /// Authenticate an email + password pair.
    ///
    /// Returns `Ok(None)` when the credentials do not match, without
    /// distinguishing an unknown email from a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<LoginResult>> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!(email, "login failed");
            return Ok(None);
        };

        if !self.hasher.verify(user.id, password, &user.password_hash) {
            debug!(email, "login failed");
            return Ok(None);
        }

        let org = self.organization_of(&user).await?;
        let identity = Identity::for_user(&user, &org);
        let token = self.issuer.issue_token_pair(&identity, None).await?;

        debug!(user_id = %user.id, "login succeeded");
        Ok(Some(LoginResult {
            token,
            user: user.to_profile(),
        }))
    }

    /// Revoke the session behind a refresh token.
    ///
    /// The token must decode; a missing store record is not an error, so
    /// logout is idempotent.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let claims = self
            .verifier
            .decode_refresh(refresh_token)
            .ok_or_else(|| AppError::authentication("Invalid token"))?;
        let token_id = claims
            .token_id
            .ok_or_else(|| AppError::authentication("Invalid token"))?;

        let existed = self.refresh_tokens.delete(token_id, claims.sub).await?;
        debug!(user_id = %claims.sub, existed, "session revoked");
        Ok(())
    }

    /// Exchange a valid refresh token for a fresh access + refresh pair.
    ///
    /// The token must decode, be unexpired, and match a live store record
    /// byte for byte; the user and organization are re-resolved so the new
    /// pair reflects their current state. The new refresh token keeps the
    /// same token id, so the upsert supersedes the presented one.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .verifier
            .decode_refresh(refresh_token)
            .ok_or_else(|| AppError::authentication("Invalid token"))?;
        let token_id = claims
            .token_id
            .ok_or_else(|| AppError::authentication("Invalid token"))?;

        let (user, record) = tokio::join!(
            self.users.find_by_id(claims.sub),
            self.refresh_tokens.find(token_id, claims.sub, refresh_token),
        );

        let (Some(user), Some(_record)) = (user?, record?) else {
            return Err(AppError::authentication("Invalid token"));
        };

        let org = self.organization_of(&user).await?;
        let identity = Identity::for_user(&user, &org);
        let pair = self.issuer.issue_token_pair(&identity, Some(token_id)).await?;

        debug!(user_id = %user.id, "session refreshed");
        Ok(pair)
    }

    /// Create a user account with a freshly hashed credential.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        organization_id: OrgId,
        role_id: RoleId,
    ) -> AppResult<UserProfile> {
        if self.organizations.find_by_id(organization_id).await?.is_none() {
            return Err(AppError::validation("Unknown organization"));
        }

        // The id is minted first because the hash salts on it.
        let id = UserId::new();
        let user = self
            .users
            .create(&NewUser {
                id,
                email: email.to_owned(),
                full_name: full_name.to_owned(),
                password_hash: self.hasher.hash(id, password),
                role_id,
                organization_id,
            })
            .await?;

        debug!(user_id = %user.id, "user registered");
        Ok(user.to_profile())
    }

    /// Drop refresh-token records past their expiry.
    ///
    /// Expired records are already invisible to `refresh` through the
    /// store's expiry filter; this reclaims the rows. Returns the number
    /// removed.
    pub async fn purge_expired_sessions(&self) -> AppResult<u64> {
        let purged = self.refresh_tokens.delete_expired().await?;
        if purged > 0 {
            debug!(purged, "expired sessions purged");
        }
        Ok(purged)
    }

    /// Replace a user's password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self
            .hasher
            .verify(user.id, current_password, &user.password_hash)
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        let new_hash = self.hasher.hash(user.id, new_password);
        self.users.update_password(user.id, &new_hash).await
    }

    async fn organization_of(&self, user: &User) -> AppResult<Organization> {
        self.organizations
            .find_by_id(user.organization_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Organization {} missing for user {}",
                    user.organization_id, user.id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use notehub_core::error::ErrorKind;
    use notehub_core::types::TokenId;
    use notehub_entity::token::RefreshTokenRecord;
    use notehub_entity::user::UserUpdate;

    #[derive(Default)]
    struct MemUsers {
        rows: Mutex<HashMap<UserId, User>>,
    }

    #[async_trait]
    impl UserStore for MemUsers {
        async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<User>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|u| u.organization_id == org_id)
                .cloned()
                .collect())
        }

        async fn create(&self, user: &NewUser) -> AppResult<User> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .values()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(AppError::conflict("Email already registered"));
            }
            let now = Utc::now();
            let row = User {
                id: user.id,
                email: user.email.clone(),
                full_name: user.full_name.clone(),
                password_hash: user.password_hash.clone(),
                role_id: user.role_id,
                organization_id: user.organization_id,
                avatar_key: None,
                created_at: now,
                updated_at: now,
            };
            rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, id: UserId, update: &UserUpdate) -> AppResult<User> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            if let Some(email) = &update.email {
                row.email = email.clone();
            }
            if let Some(full_name) = &update.full_name {
                row.full_name = full_name.clone();
            }
            if let Some(role_id) = update.role_id {
                row.role_id = role_id;
            }
            row.updated_at = Utc::now();
            Ok(row.clone())
        }

        async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            row.password_hash = password_hash.to_owned();
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemOrgs {
        rows: Mutex<HashMap<OrgId, Organization>>,
    }

    #[async_trait]
    impl OrganizationStore for MemOrgs {
        async fn find_by_id(&self, id: OrgId) -> AppResult<Option<Organization>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }
    }

    #[derive(Default)]
    struct MemTokens {
        rows: Mutex<HashMap<(TokenId, UserId), RefreshTokenRecord>>,
        fail_puts: bool,
    }

    #[async_trait]
    impl RefreshTokenStore for MemTokens {
        async fn find(
            &self,
            id: TokenId,
            user_id: UserId,
            token: &str,
        ) -> AppResult<Option<RefreshTokenRecord>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&(id, user_id))
                .filter(|r| r.token == token && r.expires_at > Utc::now())
                .cloned())
        }

        async fn put(&self, record: &RefreshTokenRecord) -> AppResult<()> {
            if self.fail_puts {
                return Err(AppError::database("connection reset"));
            }
            self.rows
                .lock()
                .unwrap()
                .insert((record.id, record.user_id), record.clone());
            Ok(())
        }

        async fn delete(&self, id: TokenId, user_id: UserId) -> AppResult<bool> {
            Ok(self.rows.lock().unwrap().remove(&(id, user_id)).is_some())
        }

        async fn delete_expired(&self) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|_, r| r.expires_at > Utc::now());
            Ok((before - rows.len()) as u64)
        }
    }

    struct Fixture {
        service: AuthService,
        verifier: TokenVerifier,
        tokens: Arc<MemTokens>,
        org_id: OrgId,
        role_id: RoleId,
    }

    fn fixture_with(tokens: Arc<MemTokens>) -> Fixture {
        let users = Arc::new(MemUsers::default());
        let orgs = Arc::new(MemOrgs::default());

        let org = Organization {
            id: OrgId::new(),
            name: "Acme".into(),
            settings: sqlx::types::Json(serde_json::json!({})),
            created_at: Utc::now(),
        };
        let org_id = org.id;
        orgs.rows.lock().unwrap().insert(org.id, org);

        let hasher = Arc::new(CredentialHasher::new("pw-secret").unwrap());
        let issuer = Arc::new(
            TokenIssuer::new("access-secret", "refresh-secret", 15, 30, tokens.clone()).unwrap(),
        );
        let verifier = TokenVerifier::new("access-secret", "refresh-secret").unwrap();

        Fixture {
            service: AuthService::new(
                users,
                orgs,
                tokens.clone(),
                issuer,
                Arc::new(verifier.clone()),
                hasher,
            ),
            verifier,
            tokens,
            org_id,
            role_id: RoleId::new(),
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(MemTokens::default()))
    }

    async fn register_ada(fx: &Fixture) -> UserProfile {
        fx.service
            .register_user("ada@acme.test", "secret123", "Ada", fx.org_id, fx.role_id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn login_issues_tokens_and_records_the_refresh_token() {
        let fx = fixture();
        let profile = register_ada(&fx).await;

        let result = fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .expect("valid credentials");

        assert_eq!(result.user, profile);

        let claims = fx
            .verifier
            .decode_access(&result.token.access_token)
            .expect("valid access token");
        assert_eq!(claims.sub, profile.id);
        assert_eq!(claims.org.id, fx.org_id);

        let refresh = fx
            .verifier
            .decode_refresh(&result.token.refresh_token)
            .expect("valid refresh token");
        assert_eq!(fx.tokens.rows.lock().unwrap().len(), 1);
        assert!(fx
            .tokens
            .rows
            .lock()
            .unwrap()
            .contains_key(&(refresh.token_id.unwrap(), profile.id)));
    }

    #[tokio::test]
    async fn bad_credentials_yield_none_not_an_error() {
        let fx = fixture();
        register_ada(&fx).await;

        let unknown = fx.service.login("nobody@acme.test", "secret123").await;
        let wrong = fx.service.login("ada@acme.test", "wrong-password").await;

        assert!(matches!(unknown, Ok(None)));
        assert!(matches!(wrong, Ok(None)));
    }

    #[tokio::test]
    async fn refresh_rotates_the_token_under_a_stable_id() {
        let fx = fixture();
        register_ada(&fx).await;
        let login = fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .unwrap();
        let first = login.token.refresh_token;
        let first_id = fx.verifier.decode_refresh(&first).unwrap().token_id;

        let rotated = fx.service.refresh(&first).await.unwrap();
        let second_id = fx
            .verifier
            .decode_refresh(&rotated.refresh_token)
            .unwrap()
            .token_id;
        assert_eq!(first_id, second_id);
        assert_eq!(fx.tokens.rows.lock().unwrap().len(), 1);

        // The presented token was superseded by the rotation.
        let replay = fx.service.refresh(&first).await;
        assert_eq!(replay.unwrap_err().kind, ErrorKind::Authentication);

        // The rotated token still works.
        assert!(fx.service.refresh(&rotated.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn logout_revokes_and_is_idempotent() {
        let fx = fixture();
        register_ada(&fx).await;
        let login = fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .unwrap();
        let refresh_token = login.token.refresh_token;

        fx.service.logout(&refresh_token).await.unwrap();
        assert!(fx.tokens.rows.lock().unwrap().is_empty());

        // Second logout of the same token is still Ok.
        fx.service.logout(&refresh_token).await.unwrap();

        let refreshed = fx.service.refresh(&refresh_token).await;
        assert_eq!(refreshed.unwrap_err().kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn garbage_tokens_map_to_the_same_authentication_error() {
        let fx = fixture();
        register_ada(&fx).await;
        let login = fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .unwrap();

        for token in [
            "not-a-jwt",
            "",
            // An access token is not accepted where a refresh token is
            // required.
            login.token.access_token.as_str(),
        ] {
            let err = fx.service.refresh(token).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
            let err = fx.service.logout(token).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
    }

    #[tokio::test]
    async fn login_fails_when_the_refresh_record_cannot_be_written() {
        let fx = fixture_with(Arc::new(MemTokens {
            rows: Mutex::new(HashMap::new()),
            fail_puts: true,
        }));
        register_ada(&fx).await;

        let result = fx.service.login("ada@acme.test", "secret123").await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::Database);
        assert!(fx.tokens.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn registration_rejects_duplicate_emails() {
        let fx = fixture();
        register_ada(&fx).await;

        let dup = fx
            .service
            .register_user("ada@acme.test", "other", "Ada 2", fx.org_id, fx.role_id)
            .await;
        assert_eq!(dup.unwrap_err().kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn registration_rejects_an_unknown_organization() {
        let fx = fixture();
        let result = fx
            .service
            .register_user("ada@acme.test", "pw", "Ada", OrgId::new(), fx.role_id)
            .await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn purge_drops_expired_records_and_keeps_live_ones() {
        let fx = fixture();
        register_ada(&fx).await;
        let login = fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .unwrap();
        let live = login.token.refresh_token;

        // A leftover record from a session whose token expired long ago.
        let stale = RefreshTokenRecord {
            id: TokenId::new(),
            user_id: UserId::new(),
            token: "stale".into(),
            expires_at: Utc::now() - chrono::Duration::days(1),
        };
        fx.tokens
            .rows
            .lock()
            .unwrap()
            .insert((stale.id, stale.user_id), stale);

        assert_eq!(fx.service.purge_expired_sessions().await.unwrap(), 1);
        assert_eq!(fx.tokens.rows.lock().unwrap().len(), 1);
        assert!(fx.service.refresh(&live).await.is_ok());

        // Nothing left to purge.
        assert_eq!(fx.service.purge_expired_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn change_password_requires_the_current_one() {
        let fx = fixture();
        let profile = register_ada(&fx).await;

        let wrong = fx
            .service
            .change_password(profile.id, "wrong", "newpass1")
            .await;
        assert_eq!(wrong.unwrap_err().kind, ErrorKind::Validation);

        fx.service
            .change_password(profile.id, "secret123", "newpass1")
            .await
            .unwrap();

        assert!(fx
            .service
            .login("ada@acme.test", "secret123")
            .await
            .unwrap()
            .is_none());
        assert!(fx
            .service
            .login("ada@acme.test", "newpass1")
            .await
            .unwrap()
            .is_some());
    }
}
