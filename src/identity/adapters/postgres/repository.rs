//! `PostgreSQL` repository implementation for user persistence.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::db::{Database, StoreError, StoreResult};
use crate::identity::{
    domain::{OpenId, User, UserId, UserRole, UserUpsert},
    ports::UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    db: Arc<Database>,
}

impl PostgresUserRepository {
    /// Creates a new repository over the shared store handle.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let Some(pool) = self.db.pool() else {
            return Err(StoreError::Unavailable);
        };
        let pool = pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::backend)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, record: &UserUpsert) -> StoreResult<User> {
        let last_signed_in = record.last_signed_in.unwrap_or_else(Utc::now);
        let new_row = NewUserRow {
            open_id: record.open_id.as_str().to_owned(),
            name: record.name.clone(),
            email: record.email.clone(),
            login_method: record.login_method.clone(),
            role: record.role.map(|role| role.as_str().to_owned()),
            last_signed_in,
            created_at: last_signed_in,
            updated_at: last_signed_in,
        };
        let changeset = UserChangeset {
            name: record.name.clone(),
            email: record.email.clone(),
            login_method: record.login_method.clone(),
            role: record.role.map(|role| role.as_str().to_owned()),
            last_signed_in,
            updated_at: last_signed_in,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .on_conflict(users::open_id)
                .do_update()
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(StoreError::backend)?;
            row_to_user(row)
        })
        .await
    }

    async fn find_by_open_id(&self, open_id: &OpenId) -> StoreResult<Option<User>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; user lookup returns nothing");
            return Ok(None);
        }
        let lookup = open_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::open_id.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; user lookup returns nothing");
            return Ok(None);
        }
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        if !self.db.is_configured() {
            tracing::warn!("database not configured; user listing is empty");
            return Ok(Vec::new());
        }
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(StoreError::backend)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> StoreResult<User> {
    let open_id = OpenId::new(row.open_id).map_err(StoreError::backend)?;
    let role = UserRole::try_from(row.role.as_str()).map_err(StoreError::backend)?;
    Ok(User {
        id: UserId::new(row.id),
        open_id,
        name: row.name,
        email: row.email,
        login_method: row.login_method,
        role,
        last_signed_in: row.last_signed_in,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
