use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::Result;
use crate::dates;
use crate::models::MeetSummary;
use storage::repository::CompetitionRepository;

/// How a scraped meet is matched against already-stored competitions.
///
/// `NameOnly` reproduces the upstream behavior: a meet re-attended in a
/// later season under the same name is flagged as already imported.
/// `NameAndDate` also requires the start dates to agree when both sides
/// have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    #[default]
    NameOnly,
    NameAndDate,
}

/// Cross-references scraped meet summaries against the competitions already
/// stored for a gymnast. Read-only: it annotates the summaries and touches
/// nothing in the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    strategy: MatchStrategy,
}

impl Reconciler {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    pub async fn annotate(
        &self,
        pool: &PgPool,
        gymnast_id: Uuid,
        summaries: &mut [MeetSummary],
    ) -> Result<()> {
        let repository = CompetitionRepository::new(pool);
        match self.strategy {
            MatchStrategy::NameOnly => {
                let names: HashSet<String> = repository
                    .list_names_for_gymnast(gymnast_id)
                    .await?
                    .into_iter()
                    .collect();
                debug!(gymnast_id = %gymnast_id, existing = names.len(), "reconciling by name");
                flag_by_name(summaries, &names);
            }
            MatchStrategy::NameAndDate => {
                let existing: Vec<(String, Option<NaiveDate>)> = repository
                    .list_for_gymnast(gymnast_id)
                    .await?
                    .into_iter()
                    .map(|c| (c.name, c.start_date))
                    .collect();
                debug!(gymnast_id = %gymnast_id, existing = existing.len(), "reconciling by name and date");
                flag_by_name_and_date(summaries, &existing);
            }
        }
        Ok(())
    }
}

/// Exact, case-sensitive name matching.
pub fn flag_by_name(summaries: &mut [MeetSummary], existing: &HashSet<String>) {
    for summary in summaries {
        summary.already_imported = existing.contains(&summary.name);
    }
}

/// Name matching tightened by start date. A stored competition without a
/// date, or a summary whose date text does not parse, falls back to the
/// name-only comparison for that pair.
pub fn flag_by_name_and_date(
    summaries: &mut [MeetSummary],
    existing: &[(String, Option<NaiveDate>)],
) {
    for summary in summaries.iter_mut() {
        let scraped_start = dates::normalize(&summary.raw_date_text).start;
        summary.already_imported = existing.iter().any(|(name, stored_start)| {
            if *name != summary.name {
                return false;
            }
            match (stored_start, scraped_start) {
                (Some(stored), Some(scraped)) => *stored == scraped,
                _ => true,
            }
        });
    }
}
