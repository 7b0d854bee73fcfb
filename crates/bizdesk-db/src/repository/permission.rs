//! SurrealDB implementation of [`PermissionRepository`].

use bizdesk_core::error::BizdeskResult;
use bizdesk_core::models::permission::{CreatePermission, Permission};
use bizdesk_core::repository::PermissionRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::CountRow;
use crate::error::{DbError, classify_write, parse_uuid};

#[derive(Debug, SurrealValue)]
struct PermissionRow {
    record_id: String,
    code: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PermissionRow {
    fn try_into_permission(self) -> Result<Permission, DbError> {
        Ok(Permission {
            id: parse_uuid("permission", &self.record_id)?,
            code: self.code,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn collect(rows: Vec<PermissionRow>) -> Result<Vec<Permission>, DbError> {
    rows.into_iter()
        .map(PermissionRow::try_into_permission)
        .collect()
}

/// SurrealDB implementation of the Permission repository.
#[derive(Clone)]
pub struct SurrealPermissionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPermissionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PermissionRepository for SurrealPermissionRepository<C> {
    async fn create(&self, input: CreatePermission) -> BizdeskResult<Permission> {
        let id = Uuid::new_v4();
        let code = input.code.clone();

        self.db
            .query(
                "CREATE type::record('permission', $id) SET \
                 code = $code, description = $description",
            )
            .bind(("id", id.to_string()))
            .bind(("code", input.code))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("permission", e))?;

        self.get_by_code(&code).await
    }

    async fn get_by_code(&self, code: &str) -> BizdeskResult<Permission> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM permission \
                 WHERE code = $code LIMIT 1",
            )
            .bind(("code", code.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("permission", code))?;

        Ok(row.try_into_permission()?)
    }

    async fn list(&self) -> BizdeskResult<Vec<Permission>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM permission ORDER BY code ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        Ok(collect(rows)?)
    }

    async fn grant_to_role(&self, role_id: Uuid, permission_id: Uuid) -> BizdeskResult<()> {
        let mut existing = self
            .db
            .query(
                "SELECT count() AS total FROM grants WHERE \
                 in = type::record('role', $role_id) AND \
                 out = type::record('permission', $perm_id) GROUP ALL",
            )
            .bind(("role_id", role_id.to_string()))
            .bind(("perm_id", permission_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let counts: Vec<CountRow> = existing.take(0).map_err(DbError::from)?;
        if counts.first().is_some_and(|c| c.total > 0) {
            return Ok(());
        }

        let query = format!("RELATE role:`{role_id}` -> grants -> permission:`{permission_id}`;");

        self.db
            .query(query)
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn revoke_from_role(&self, role_id: Uuid, permission_id: Uuid) -> BizdeskResult<()> {
        self.db
            .query(
                "DELETE grants WHERE \
                 in = type::record('role', $role_id) AND \
                 out = type::record('permission', $perm_id)",
            )
            .bind(("role_id", role_id.to_string()))
            .bind(("perm_id", permission_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn get_role_permissions(&self, role_id: Uuid) -> BizdeskResult<Vec<Permission>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM permission \
                 WHERE id IN (\
                     SELECT VALUE out FROM grants \
                     WHERE in = type::record('role', $role_id)\
                 ) \
                 ORDER BY code ASC",
            )
            .bind(("role_id", role_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRow> = result.take(0).map_err(DbError::from)?;
        Ok(collect(rows)?)
    }
}
