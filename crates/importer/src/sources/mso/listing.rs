use scraper::{ElementRef, Html};

use super::{MSO_BASE_URL, selector, text_of};
use crate::error::{ImporterError, Result};
use crate::models::MeetSummary;

/// Sentinel for listings whose date column is absent or empty.
pub const DATE_UNKNOWN: &str = "Date TBD";

// A row whose name equals its level and is this short is a misaligned
// column, not a meet.
const ARTIFACT_NAME_MAX_LEN: usize = 5;

/// Extracts meet summaries from an athlete's results listing page. The
/// selector knowledge is deliberately confined here: the site publishes no
/// schema, so this parser is coupled to its current table layout, and a
/// structural change upstream degrades to `NoResults` rather than a hard
/// parse error.
pub trait ListingParser: Send + Sync {
    fn parse(&self, html: &str) -> Result<Vec<MeetSummary>>;
}

/// Parser for the MeetScoresOnline listing table. Column positions:
/// 0 = meet name (holds the detail link), 1 = club, 2 = level,
/// 3 = division, 4 = date (sometimes missing).
pub struct MsoListingParser {
    base_url: String,
}

impl MsoListingParser {
    pub fn new() -> Self {
        Self {
            base_url: MSO_BASE_URL.to_string(),
        }
    }
}

impl Default for MsoListingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingParser for MsoListingParser {
    fn parse(&self, html: &str) -> Result<Vec<MeetSummary>> {
        let document = Html::parse_document(html);
        let link_selector = selector(r#"a[href^="/results/"]"#)?;
        let cell_selector = selector("td")?;

        let mut meets: Vec<MeetSummary> = Vec::new();

        for link in document.select(&link_selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };

            // Climb to the containing row to reach the sibling columns
            let Some(row) = link
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "tr")
            else {
                continue;
            };

            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

            let mut name = cells.first().map(text_of).unwrap_or_default();
            if name.is_empty() {
                name = text_of(&link);
            }

            let level = cells.get(2).map(text_of).unwrap_or_default();

            let raw_date_text = cells
                .get(4)
                .map(text_of)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DATE_UNKNOWN.to_string());

            if name == level && name.len() < ARTIFACT_NAME_MAX_LEN {
                continue;
            }
            if name.is_empty() {
                continue;
            }
            if meets.iter().any(|meet| meet.external_id == href) {
                continue;
            }

            meets.push(MeetSummary {
                external_id: href.to_string(),
                name,
                level,
                raw_date_text,
                details_url: format!("{}{}", self.base_url, href),
                already_imported: false,
            });
        }

        if meets.is_empty() {
            return Err(ImporterError::NoResults);
        }

        Ok(meets)
    }
}
