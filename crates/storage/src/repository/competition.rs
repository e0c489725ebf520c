use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::competition::NewCompetition;
use crate::error::{Result, StorageError};
use crate::models::Competition;

/// Repository for competition reads and writes.
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions for one gymnast, most recent first.
    pub async fn list_for_gymnast(&self, gymnast_id: Uuid) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT competition_id, user_id, gymnast_id, name, level,
                   start_date, end_date, all_around_place, created_at
            FROM competitions
            WHERE gymnast_id = $1
            ORDER BY start_date DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(gymnast_id)
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Names of every competition already stored for a gymnast. This is the
    /// read side of import reconciliation.
    pub async fn list_names_for_gymnast(&self, gymnast_id: Uuid) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name FROM competitions WHERE gymnast_id = $1
            "#,
        )
        .bind(gymnast_id)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    /// Insert a competition inside a caller-owned transaction, returning the
    /// new id. The payload is validated first so an invalid record never
    /// reaches the database.
    pub async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        req: &NewCompetition,
    ) -> Result<Uuid> {
        req.validate()
            .map_err(|e| StorageError::Validation(e.to_string()))?;

        let competition_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO competitions
                (user_id, gymnast_id, name, level, start_date, end_date, all_around_place)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING competition_id
            "#,
        )
        .bind(req.user_id)
        .bind(req.gymnast_id)
        .bind(&req.name)
        .bind(&req.level)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.all_around_place)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                return StorageError::ConstraintViolation(
                    "Gymnast profile does not exist".to_string(),
                );
            }
            err
        })?;

        Ok(competition_id)
    }
}
