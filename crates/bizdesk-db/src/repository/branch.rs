//! SurrealDB implementation of [`BranchRepository`].

use bizdesk_core::error::BizdeskResult;
use bizdesk_core::models::branch::{Branch, CreateBranch, UpdateBranch};
use bizdesk_core::repository::{BranchRepository, PaginatedResult, Pagination};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::CountRow;
use crate::error::{DbError, classify_write, parse_uuid};

#[derive(Debug, SurrealValue)]
struct BranchRow {
    record_id: String,
    tenant_id: String,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BranchRow {
    fn try_into_branch(self) -> Result<Branch, DbError> {
        Ok(Branch {
            id: parse_uuid("branch", &self.record_id)?,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Branch repository.
#[derive(Clone)]
pub struct SurrealBranchRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBranchRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BranchRepository for SurrealBranchRepository<C> {
    async fn create(&self, input: CreateBranch) -> BizdeskResult<Branch> {
        let id = Uuid::new_v4();

        self.db
            .query(
                "CREATE type::record('branch', $id) SET \
                 tenant_id = $tenant_id, name = $name, \
                 phone = $phone, email = $email, address = $address",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("name", input.name))
            .bind(("phone", input.phone))
            .bind(("email", input.email))
            .bind(("address", input.address))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("branch", e))?;

        self.get_by_id(input.tenant_id, id).await
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> BizdeskResult<Branch> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM type::record('branch', $id) WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BranchRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("branch", id_str))?;

        Ok(row.try_into_branch()?)
    }

    async fn get_by_name(&self, tenant_id: Uuid, name: &str) -> BizdeskResult<Branch> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM branch \
                 WHERE tenant_id = $tenant_id AND name = $name LIMIT 1",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BranchRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("branch", name))?;

        Ok(row.try_into_branch()?)
    }

    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBranch,
    ) -> BizdeskResult<Branch> {
        // UPDATE on a missing record id would create it.
        self.get_by_id(tenant_id, id).await?;

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.phone.is_some() {
            sets.push("phone = $phone");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('branch', $id) SET {} \
             WHERE tenant_id = $tenant_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(phone) = input.phone {
            builder = builder.bind(("phone", phone));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }

        builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("branch", e))?;

        self.get_by_id(tenant_id, id).await
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> BizdeskResult<()> {
        self.get_by_id(tenant_id, id).await?;

        self.db
            .query("DELETE type::record('branch', $id) WHERE tenant_id = $tenant_id")
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> BizdeskResult<PaginatedResult<Branch>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM branch \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM branch \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY name ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BranchRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(BranchRow::try_into_branch)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
