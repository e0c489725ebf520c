use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Gymnast;

/// Repository for gymnast profile reads. The importer only ever resolves a
/// profile; creating and editing profiles happens elsewhere.
pub struct GymnastRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GymnastRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all profiles owned by a user, oldest first.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Gymnast>> {
        let gymnasts = sqlx::query_as::<_, Gymnast>(
            r#"
            SELECT gymnast_id, user_id, name, created_at
            FROM gymnasts
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(gymnasts)
    }

    /// Resolve the profile an import should be scoped to. A preferred id is
    /// honored only when it belongs to the user; otherwise the user's first
    /// profile wins. No profile at all is `NotFound`.
    pub async fn resolve_active(
        &self,
        user_id: Uuid,
        preferred: Option<Uuid>,
    ) -> Result<Gymnast> {
        if let Some(gymnast_id) = preferred {
            let owned = sqlx::query_as::<_, Gymnast>(
                r#"
                SELECT gymnast_id, user_id, name, created_at
                FROM gymnasts
                WHERE gymnast_id = $1 AND user_id = $2
                "#,
            )
            .bind(gymnast_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

            if let Some(gymnast) = owned {
                return Ok(gymnast);
            }
        }

        sqlx::query_as::<_, Gymnast>(
            r#"
            SELECT gymnast_id, user_id, name, created_at
            FROM gymnasts
            WHERE user_id = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
