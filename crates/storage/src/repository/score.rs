use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::score::NewScore;
use crate::error::{Result, StorageError};
use crate::models::Score;

/// Repository for apparatus score reads and writes.
pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_competition(&self, competition_id: Uuid) -> Result<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(
            r#"
            SELECT score_id, competition_id, apparatus, value, place, start_value
            FROM scores
            WHERE competition_id = $1
            ORDER BY apparatus
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Upsert a batch of scores inside a caller-owned transaction. Keyed on
    /// (competition_id, apparatus) so re-importing a meet can never leave
    /// two rows for the same apparatus.
    pub async fn upsert_many_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        competition_id: Uuid,
        scores: &[NewScore],
    ) -> Result<()> {
        for score in scores {
            score
                .validate()
                .map_err(|e| StorageError::Validation(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO scores (competition_id, apparatus, value, place, start_value)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (competition_id, apparatus)
                DO UPDATE SET
                    value = EXCLUDED.value,
                    place = EXCLUDED.place,
                    start_value = EXCLUDED.start_value
                "#,
            )
            .bind(competition_id)
            .bind(&score.apparatus)
            .bind(score.value)
            .bind(score.place)
            .bind(score.start_value)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(
                        "Competition does not exist".to_string(),
                    );
                }
                err
            })?;
        }

        Ok(())
    }
}
