//! SurrealDB implementation of [`RoleRepository`].

use bizdesk_core::error::BizdeskResult;
use bizdesk_core::models::role::{CreateRole, Role};
use bizdesk_core::repository::RoleRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::CountRow;
use crate::error::{DbError, classify_write, parse_uuid};

#[derive(Debug, SurrealValue)]
struct RoleRow {
    record_id: String,
    tenant_id: String,
    slug: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRow {
    fn try_into_role(self) -> Result<Role, DbError> {
        Ok(Role {
            id: parse_uuid("role", &self.record_id)?,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            slug: self.slug,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Role repository.
#[derive(Clone)]
pub struct SurrealRoleRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoleRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RoleRepository for SurrealRoleRepository<C> {
    async fn create(&self, input: CreateRole) -> BizdeskResult<Role> {
        let id = Uuid::new_v4();

        self.db
            .query(
                "CREATE type::record('role', $id) SET \
                 tenant_id = $tenant_id, slug = $slug, name = $name",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("slug", input.slug))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("role", e))?;

        self.get_by_id(input.tenant_id, id).await
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> BizdeskResult<Role> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM type::record('role', $id) WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("role", id_str))?;

        Ok(row.try_into_role()?)
    }

    async fn assign_to_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> BizdeskResult<()> {
        // A role from another tenant must not leak in through an edge.
        self.get_by_id(tenant_id, role_id).await?;

        let mut existing = self
            .db
            .query(
                "SELECT count() AS total FROM has_role WHERE \
                 in = type::record('user', $user_id) AND \
                 out = type::record('role', $role_id) GROUP ALL",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("role_id", role_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let counts: Vec<CountRow> = existing.take(0).map_err(DbError::from)?;
        if counts.first().is_some_and(|c| c.total > 0) {
            return Ok(());
        }

        // RELATE requires literal record-id syntax; UUIDs are safe to embed.
        let query = format!("RELATE user:`{user_id}` -> has_role -> role:`{role_id}`;");

        self.db
            .query(query)
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn unassign_from_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> BizdeskResult<()> {
        self.get_by_id(tenant_id, role_id).await?;

        self.db
            .query(
                "DELETE has_role WHERE \
                 in = type::record('user', $user_id) AND \
                 out = type::record('role', $role_id)",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("role_id", role_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn get_user_roles(&self, tenant_id: Uuid, user_id: Uuid) -> BizdeskResult<Vec<Role>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM role \
                 WHERE tenant_id = $tenant_id \
                 AND id IN (\
                     SELECT VALUE out FROM has_role \
                     WHERE in = type::record('user', $user_id)\
                 ) \
                 ORDER BY slug ASC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;

        let roles = rows
            .into_iter()
            .map(RoleRow::try_into_role)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(roles)
    }
}
