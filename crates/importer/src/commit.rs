use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::Result;
use storage::dto::{NewCompetition, NewScore};
use storage::repository::{CompetitionRepository, ScoreRepository};

pub const SCORE_TABLE_MISMATCH_WARNING: &str =
    "Meet created, but score table format didn't match.";

/// Result of one committed import. A committed competition can still carry
/// warnings (no scores extracted, dates unparseable); those are data for
/// the caller to display, not errors.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub competition_id: Uuid,
    pub warnings: Vec<String>,
}

impl ImportOutcome {
    pub fn new(competition_id: Uuid) -> Self {
        Self {
            competition_id,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Persists one competition and its score rows as a single transaction.
///
/// The competition insert and the score upserts either all land or none do:
/// a failed score write rolls the competition back, so a meet can never be
/// left half-imported by a storage failure. A meet whose score table did
/// not match the expected shape is still a valid import — it commits with
/// zero scores and a warning.
pub struct ImportCommitter<'a> {
    pool: &'a PgPool,
}

impl<'a> ImportCommitter<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn commit(
        &self,
        competition: &NewCompetition,
        scores: &[NewScore],
    ) -> Result<ImportOutcome> {
        let mut tx = self.pool.begin().await?;

        // Errors from here on drop the transaction, rolling everything back.
        let competition_id = CompetitionRepository::insert_tx(&mut tx, competition).await?;

        if scores.is_empty() {
            tx.commit().await?;
            warn!(
                competition_id = %competition_id,
                name = %competition.name,
                "imported competition without scores"
            );
            let mut outcome = ImportOutcome::new(competition_id);
            outcome.push_warning(SCORE_TABLE_MISMATCH_WARNING);
            return Ok(outcome);
        }

        ScoreRepository::upsert_many_tx(&mut tx, competition_id, scores).await?;
        tx.commit().await?;

        info!(
            competition_id = %competition_id,
            name = %competition.name,
            scores = scores.len(),
            "imported competition"
        );
        Ok(ImportOutcome::new(competition_id))
    }
}
