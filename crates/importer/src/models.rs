use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::apparatus::Apparatus;

/// One row of an athlete's results listing. Lives only for the duration of
/// one list/select round trip; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetSummary {
    /// The site's relative link path, stable within one listing fetch and
    /// used as the dedup key.
    pub external_id: String,
    pub name: String,
    pub level: String,
    pub raw_date_text: String,
    pub details_url: String,
    #[serde(default)]
    pub already_imported: bool,
}

/// One apparatus result scraped from a meet detail page. Rows only exist
/// when the label mapped and the score parsed; the place is optional
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapedScore {
    pub apparatus: Apparatus,
    pub value: Decimal,
    pub place: Option<i32>,
}

/// Everything extracted from one meet detail page. Pure data, no
/// persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetDetail {
    pub name: String,
    pub raw_date_text: String,
    pub scores: Vec<ScrapedScore>,
    pub all_around_place: Option<i32>,
}
