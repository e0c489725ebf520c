mod client;
mod detail;
mod listing;

pub use client::{MSO_BASE_URL, MsoClient};
pub use detail::{DetailParser, MsoDetailParser};
pub use listing::{DATE_UNKNOWN, ListingParser, MsoListingParser};

use scraper::{ElementRef, Selector};
use tracing::info;
use uuid::Uuid;

use crate::commit::ImportCommitter;
use crate::error::{ImporterError, Result};
use crate::models::MeetSummary;
use crate::reconcile::{MatchStrategy, Reconciler};
use crate::traits::{ImportContext, MeetImporter};
use crate::{ImportOutcome, dates};
use storage::dto::{NewCompetition, NewScore};

pub(crate) fn selector(input: &str) -> Result<Selector> {
    Selector::parse(input).map_err(|e| ImporterError::Selector(e.to_string()))
}

pub(crate) fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The MeetScoresOnline importer: fetches an athlete's public results
/// pages, reconciles them against what is already stored, and commits the
/// selected meet. Holds no state between calls; the caller drives the
/// listing/select/import loop one meet at a time.
pub struct MsoImporter {
    client: MsoClient,
    listing_parser: Box<dyn ListingParser>,
    detail_parser: Box<dyn DetailParser>,
    reconciler: Reconciler,
}

impl MsoImporter {
    pub fn new() -> Self {
        Self::with_strategy(MatchStrategy::default())
    }

    pub fn with_strategy(strategy: MatchStrategy) -> Self {
        Self {
            client: MsoClient::new(),
            listing_parser: Box::new(MsoListingParser::new()),
            detail_parser: Box::new(MsoDetailParser::default()),
            reconciler: Reconciler::new(strategy),
        }
    }

    /// Substitute the selector-coupled parsers, e.g. with test doubles that
    /// never touch the real page layout.
    pub fn with_parsers(
        mut self,
        listing_parser: Box<dyn ListingParser>,
        detail_parser: Box<dyn DetailParser>,
    ) -> Self {
        self.listing_parser = listing_parser;
        self.detail_parser = detail_parser;
        self
    }

    /// Point the importer at a different host, e.g. a local fixture server.
    pub fn with_client(mut self, client: MsoClient) -> Self {
        self.client = client;
        self
    }
}

impl Default for MsoImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MeetImporter for MsoImporter {
    async fn fetch_meet_list(
        &self,
        athlete_id: &str,
        gymnast_id: Uuid,
        context: &ImportContext,
    ) -> Result<Vec<MeetSummary>> {
        if athlete_id.trim().is_empty() {
            return Err(ImporterError::Validation(
                "No athlete ID provided".to_string(),
            ));
        }

        let html = self.client.fetch_listing(athlete_id.trim()).await?;
        let mut summaries = self.listing_parser.parse(&html)?;

        self.reconciler
            .annotate(&context.pool, gymnast_id, &mut summaries)
            .await?;

        info!(
            athlete_id,
            meets = summaries.len(),
            imported = summaries.iter().filter(|s| s.already_imported).count(),
            "fetched meet listing"
        );
        Ok(summaries)
    }

    async fn import_meet(
        &self,
        summary: &MeetSummary,
        user_id: Uuid,
        gymnast_id: Uuid,
        context: &ImportContext,
    ) -> Result<ImportOutcome> {
        let html = self.client.fetch_detail(&summary.details_url).await?;
        let detail = self.detail_parser.parse(&html, summary)?;

        let range = dates::normalize(&detail.raw_date_text);

        let competition = NewCompetition {
            user_id,
            gymnast_id,
            name: detail.name.clone(),
            level: Some(summary.level.clone()).filter(|level| !level.is_empty()),
            start_date: range.start,
            end_date: range.end,
            all_around_place: detail.all_around_place,
        };

        let scores: Vec<NewScore> = detail
            .scores
            .iter()
            .map(|score| NewScore {
                apparatus: score.apparatus.as_str().to_string(),
                value: Some(score.value),
                place: score.place,
                start_value: None,
            })
            .collect();

        let mut outcome = ImportCommitter::new(&context.pool)
            .commit(&competition, &scores)
            .await?;

        if range.is_unknown() {
            outcome.push_warning(format!(
                "Could not parse meet date {:?}; saved without dates.",
                detail.raw_date_text
            ));
        }

        info!(
            competition_id = %outcome.competition_id,
            name = %detail.name,
            warnings = outcome.warnings.len(),
            "imported meet"
        );
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "MeetScoresOnline"
    }
}
