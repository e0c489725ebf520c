use crate::Result;
use crate::commit::ImportOutcome;
use crate::models::MeetSummary;
use sqlx::PgPool;
use uuid::Uuid;

/// Shared collaborators handed to every pipeline call. The pipeline keeps no
/// state of its own between calls; everything it knows it reads fresh
/// through the pool.
pub struct ImportContext {
    pub pool: PgPool,
}

/// A source of external meet results. Two independent entry points: listing
/// (fetch + reconcile) and import-one. The caller drives the loop one meet
/// at a time.
#[async_trait::async_trait]
pub trait MeetImporter: Send + Sync {
    /// Fetch the athlete's meet listing and flag entries already stored for
    /// the given gymnast profile.
    async fn fetch_meet_list(
        &self,
        athlete_id: &str,
        gymnast_id: Uuid,
        context: &ImportContext,
    ) -> Result<Vec<MeetSummary>>;

    /// Fetch one meet's detail page, extract its scores and commit the
    /// competition for the given owner and profile.
    async fn import_meet(
        &self,
        summary: &MeetSummary,
        user_id: Uuid,
        gymnast_id: Uuid,
        context: &ImportContext,
    ) -> Result<ImportOutcome>;

    fn name(&self) -> &'static str;
}
