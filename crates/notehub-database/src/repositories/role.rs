//! Role repository implementation.
//!
//! Every lookup is scoped to an organization; a role id from another
//! tenant never resolves.

use async_trait::async_trait;
use sqlx::PgPool;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::{OrgId, RoleId};
use notehub_entity::role::{PermissionSet, Role};
use notehub_entity::store::RoleStore;

/// Repository for role CRUD, always organization-scoped.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_id(&self, org_id: OrgId, role_id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1 AND organization_id = $2")
            .bind(role_id)
            .bind(org_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role by id", e))
    }

    async fn find_by_name(&self, org_id: OrgId, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE organization_id = $1 AND name = $2")
            .bind(org_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }

    async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE organization_id = $1 ORDER BY name ASC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    async fn create(
        &self,
        org_id: OrgId,
        name: &str,
        permissions: &PermissionSet,
    ) -> AppResult<Role> {
        let permissions = serde_json::to_value(permissions)?;
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (organization_id, name, permissions) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(org_id)
        .bind(name)
        .bind(permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("roles_organization_id_name_key") =>
            {
                AppError::conflict(format!("`{name}` already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create role", e),
        })
    }

    async fn update(
        &self,
        org_id: OrgId,
        role_id: RoleId,
        name: &str,
        permissions: &PermissionSet,
    ) -> AppResult<Role> {
        let permissions = serde_json::to_value(permissions)?;
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = $3, permissions = $4, updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 RETURNING *",
        )
        .bind(role_id)
        .bind(org_id)
        .bind(name)
        .bind(permissions)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("Role {role_id} not found")))
    }
}
