//! Store traits for the persistence collaborators.
//!
//! The auth core and HTTP handlers depend on these traits rather than on
//! concrete repositories, so the PostgreSQL implementations in
//! `notehub-database` can be swapped for in-memory versions in tests.

use async_trait::async_trait;

use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, OrgId, RoleId, TokenId, UserId};

use crate::note::{NewNote, Note, NoteUpdate};
use crate::organization::Organization;
use crate::role::{PermissionSet, Role};
use crate::token::RefreshTokenRecord;
use crate::user::{NewUser, User, UserUpdate};

/// Identity store: lookup by primary key and by the email secondary index.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// List all users in an organization.
    async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<User>>;
    /// Persist a new user.
    async fn create(&self, user: &NewUser) -> AppResult<User>;
    /// Apply a partial profile update.
    async fn update(&self, id: UserId, update: &UserUpdate) -> AppResult<User>;
    /// Replace the stored credential hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;
}

/// Organization store.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Find an organization by primary key.
    async fn find_by_id(&self, id: OrgId) -> AppResult<Option<Organization>>;
}

/// Role store, always scoped to an organization.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Find a role by id within an organization.
    async fn find_by_id(&self, org_id: OrgId, role_id: RoleId) -> AppResult<Option<Role>>;
    /// Find a role by name within an organization.
    async fn find_by_name(&self, org_id: OrgId, name: &str) -> AppResult<Option<Role>>;
    /// List an organization's roles.
    async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<Role>>;
    /// Persist a new role.
    async fn create(&self, org_id: OrgId, name: &str, permissions: &PermissionSet)
        -> AppResult<Role>;
    /// Replace a role's name and permissions.
    async fn update(
        &self,
        org_id: OrgId,
        role_id: RoleId,
        name: &str,
        permissions: &PermissionSet,
    ) -> AppResult<Role>;
}

/// Refresh-token store keyed by `(token id, user id)`.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Find the record for `(id, user_id)` whose stored token string is
    /// exactly `token`. A record with a different token value (superseded
    /// by rotation) does not match.
    async fn find(
        &self,
        id: TokenId,
        user_id: UserId,
        token: &str,
    ) -> AppResult<Option<RefreshTokenRecord>>;
    /// Insert or replace the record for `(record.id, record.user_id)`.
    async fn put(&self, record: &RefreshTokenRecord) -> AppResult<()>;
    /// Delete the record; returns whether a record existed.
    async fn delete(&self, id: TokenId, user_id: UserId) -> AppResult<bool>;
    /// Delete all expired records; returns the number removed.
    async fn delete_expired(&self) -> AppResult<u64>;
}

/// Note store.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Find a note by id within an organization.
    async fn find_by_id(&self, org_id: OrgId, note_id: NoteId) -> AppResult<Option<Note>>;
    /// List an organization's notes, newest first.
    async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<Note>>;
    /// Persist a new note.
    async fn create(&self, note: &NewNote) -> AppResult<Note>;
    /// Apply a partial update.
    async fn update(&self, org_id: OrgId, note_id: NoteId, update: &NoteUpdate) -> AppResult<Note>;
    /// Delete a note; returns whether it existed.
    async fn delete(&self, org_id: OrgId, note_id: NoteId) -> AppResult<bool>;
}
