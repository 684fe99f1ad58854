/*
 * Responsibility
 * - `UserStore`: the contract handlers use to read/update a petitioner record
 * - `PgUserStore`: SQLx operations on the `petitioners` table
 * - DB errors are returned as RepoError (handlers turn them into 500)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// Stored petitioner. Not serializable; responses go through the dashboard DTOs.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    // Argon2 PHC string
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `Ok(None)` when no petitioner has this username.
    async fn fetch_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>>;

    // Applies `update` and returns the stored record, `Ok(None)` when the username is unknown.
    async fn update_by_username(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> RepoResult<Option<UserRecord>>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, name, email, password_hash
            FROM petitioners
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn update_by_username(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> RepoResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE petitioners
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE username = $1
            RETURNING id, username, name, email, password_hash
            "#,
        )
        .bind(username)
        .bind(update.name.as_deref())
        .bind(update.email.as_deref())
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}
