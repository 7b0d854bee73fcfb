//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time. Emails are stored lowercased.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use bizdesk_core::error::BizdeskResult;
use bizdesk_core::models::user::{CreateUser, UpdateUser, User, UserStatus};
use bizdesk_core::repository::UserRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, classify_write, parse_uuid};

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRow {
    record_id: String,
    tenant_id: String,
    name: String,
    email: String,
    password_hash: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<UserStatus, DbError> {
    match s {
        "Active" => Ok(UserStatus::Active),
        "Inactive" => Ok(UserStatus::Inactive),
        other => Err(DbError::Decode(format!("unknown user status: {other}"))),
    }
}

fn status_to_string(s: UserStatus) -> &'static str {
    match s {
        UserStatus::Active => "Active",
        UserStatus::Inactive => "Inactive",
    }
}

impl UserRow {
    fn try_into_user(self) -> Result<User, DbError> {
        Ok(User {
            id: parse_uuid("user", &self.record_id)?,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Decode(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let input = match pepper {
        Some(p) => format!("{p}{password}"),
        None => password.to_owned(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input.as_bytes(), &salt)
        .map_err(|e| DbError::Decode(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

const SELECT_BY_ID: &str = "SELECT meta::id(id) AS record_id, * \
     FROM type::record('user', $id) WHERE tenant_id = $tenant_id";

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    async fn fetch(&self, tenant_id: Uuid, id: Uuid) -> Result<User, DbError> {
        let id_str = id.to_string();
        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await?;

        let rows: Vec<UserRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", id_str))?
            .try_into_user()
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> BizdeskResult<User> {
        let id = Uuid::new_v4();
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        self.db
            .query(
                "CREATE type::record('user', $id) SET \
                 tenant_id = $tenant_id, \
                 name = $name, email = $email, \
                 password_hash = $password_hash, \
                 status = $status",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("name", input.name))
            .bind(("email", input.email.trim().to_lowercase()))
            .bind(("password_hash", password_hash))
            .bind(("status", status_to_string(UserStatus::Active)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("user", e))?;

        Ok(self.fetch(input.tenant_id, id).await?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> BizdeskResult<User> {
        Ok(self.fetch(tenant_id, id).await?)
    }

    async fn get_by_email(&self, email: &str) -> BizdeskResult<User> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email LIMIT 1",
            )
            .bind(("email", email.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", email))?;

        Ok(row.try_into_user()?)
    }

    async fn update(&self, tenant_id: Uuid, id: Uuid, input: UpdateUser) -> BizdeskResult<User> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('user', $id) SET {} \
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
        if let Some(status) = input.status {
            builder = builder.bind(("status", status_to_string(status)));
        }

        builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| classify_write("user", e))?;

        Ok(self.fetch(tenant_id, id).await?)
    }
}
