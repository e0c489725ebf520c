use rust_decimal::Decimal;
use scraper::Html;

use super::{selector, text_of};
use crate::apparatus::{ApparatusMapper, LabelTable};
use crate::error::Result;
use crate::models::{MeetDetail, MeetSummary, ScrapedScore};

/// Event label the site uses for the combined all-around row. It carries a
/// placement but no apparatus score.
const ALL_AROUND_LABEL: &str = "AA";

/// Extracts the authoritative meet name, date string and per-apparatus
/// scores from one meet detail page. Pure extraction, no persistence.
pub trait DetailParser: Send + Sync {
    fn parse(&self, html: &str, summary: &MeetSummary) -> Result<MeetDetail>;
}

/// Parser for the MeetScoresOnline detail page. The detail page is the
/// source of truth for name and date — the listing may truncate or
/// reformat both — with the summary's values as fallback when the expected
/// elements are missing.
pub struct MsoDetailParser {
    mapper: LabelTable,
}

impl MsoDetailParser {
    pub fn new(mapper: LabelTable) -> Self {
        Self { mapper }
    }
}

impl Default for MsoDetailParser {
    fn default() -> Self {
        Self::new(LabelTable::mso())
    }
}

impl DetailParser for MsoDetailParser {
    fn parse(&self, html: &str, summary: &MeetSummary) -> Result<MeetDetail> {
        let document = Html::parse_document(html);
        let title_selector = selector("h1.event-title")?;
        let date_selector = selector("#MeetDetails h5 strong")?;
        let row_selector = selector("#athlete table tbody tr")?;
        let label_selector = selector("th")?;
        let score_selector = selector("span.score")?;
        let place_selector = selector("span.place")?;

        let mut name = document
            .select(&title_selector)
            .next()
            .map(|el| text_of(&el))
            .unwrap_or_default();
        if name.is_empty() {
            name = summary.name.clone();
        }

        let raw_date_text = document
            .select(&date_selector)
            .next()
            .map(|el| text_of(&el))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| summary.raw_date_text.clone());

        let mut scores = Vec::new();
        let mut all_around_place = None;

        for row in document.select(&row_selector) {
            let label = row
                .select(&label_selector)
                .next()
                .map(|el| text_of(&el))
                .unwrap_or_default();
            let score_text = row
                .select(&score_selector)
                .next()
                .map(|el| text_of(&el))
                .unwrap_or_default();
            let place = row
                .select(&place_selector)
                .next()
                .and_then(|el| parse_place(&text_of(&el)));

            if label == ALL_AROUND_LABEL {
                if let Some(place) = place {
                    all_around_place = Some(place);
                }
                continue;
            }

            // Unmapped labels and unparseable scores are silently skipped:
            // an unexpected event name upstream must not abort an
            // otherwise-valid import.
            let Some(apparatus) = self.mapper.map_label(&label) else {
                continue;
            };
            let Ok(value) = score_text.parse::<Decimal>() else {
                continue;
            };

            scores.push(ScrapedScore {
                apparatus,
                value,
                place,
            });
        }

        Ok(MeetDetail {
            name,
            raw_date_text,
            scores,
            all_around_place,
        })
    }
}

/// Parse a ranking, stripping the trailing tie marker ("3T" ties collapse
/// to rank 3). Unparseable or non-positive text is no place at all.
fn parse_place(text: &str) -> Option<i32> {
    text.trim()
        .trim_end_matches('T')
        .parse::<i32>()
        .ok()
        .filter(|place| *place > 0)
}
