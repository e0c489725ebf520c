use chrono::{Datelike, NaiveDate};

/// A normalized start/end pair. Both sides are `None` when the raw text did
/// not parse; the import still proceeds and the dates stay editable later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unknown(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

const FORMATS: [&str; 5] = ["%b %d, %Y", "%B %d, %Y", "%m/%d/%Y", "%m/%d/%y", "%b %d %Y"];

// Range starts like "Jan 5" in "Jan 5 - Jan 7, 2024" carry no year of
// their own; the year is borrowed from the end date.
const PARTIAL_FORMATS: [&str; 2] = ["%b %d", "%B %d"];

/// Parse the free-text date string from a results page into a start/end
/// pair. A hyphen splits the text into two independently parsed halves;
/// otherwise one parse covers both. Never fails: unparseable input yields
/// an unknown range and the caller reports a soft warning.
pub fn normalize(raw: &str) -> DateRange {
    let clean = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if clean.is_empty() {
        return DateRange::default();
    }

    if let Some((first, second)) = clean.split_once('-') {
        let (first, second) = (first.trim(), second.trim());
        let end = parse_full(second);
        let start = match end {
            Some(end) => parse_with_year(first, end.year()),
            None => parse_full(first),
        };
        match (start, end) {
            (Some(start), Some(end)) if start <= end => DateRange {
                start: Some(start),
                end: Some(end),
            },
            // Reversed halves still describe a valid span
            (Some(start), Some(end)) => DateRange {
                start: Some(end),
                end: Some(start),
            },
            _ => DateRange::default(),
        }
    } else {
        match parse_full(&clean) {
            Some(date) => DateRange {
                start: Some(date),
                end: Some(date),
            },
            None => DateRange::default(),
        }
    }
}

fn parse_full(text: &str) -> Option<NaiveDate> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn parse_with_year(text: &str, year: i32) -> Option<NaiveDate> {
    parse_full(text).or_else(|| {
        PARTIAL_FORMATS.iter().find_map(|format| {
            NaiveDate::parse_from_str(&format!("{text}, {year}"), &format!("{format}, %Y")).ok()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn single_date_fills_both_ends() {
        let range = normalize("Jan 5, 2024");
        assert_eq!(range.start, date(2024, 1, 5));
        assert_eq!(range.end, date(2024, 1, 5));
    }

    #[test]
    fn hyphenated_range_parses_both_halves() {
        let range = normalize("Jan 5 - Jan 7, 2024");
        assert_eq!(range.start, date(2024, 1, 5));
        assert_eq!(range.end, date(2024, 1, 7));
    }

    #[test]
    fn range_with_full_dates_on_both_sides() {
        let range = normalize("Dec 30, 2023 - Jan 2, 2024");
        assert_eq!(range.start, date(2023, 12, 30));
        assert_eq!(range.end, date(2024, 1, 2));
    }

    #[test]
    fn garbage_degrades_to_unknown() {
        let range = normalize("garbage");
        assert!(range.is_unknown());
    }

    #[test]
    fn date_tbd_sentinel_is_unknown() {
        assert!(normalize("Date TBD").is_unknown());
    }

    #[test]
    fn empty_input_is_unknown() {
        assert!(normalize("").is_unknown());
        assert!(normalize("   ").is_unknown());
    }

    #[test]
    fn internal_whitespace_is_collapsed() {
        let range = normalize("  Jan   5,\n 2024 ");
        assert_eq!(range.start, date(2024, 1, 5));
    }

    #[test]
    fn numeric_format_is_accepted() {
        let range = normalize("01/05/2024");
        assert_eq!(range.start, date(2024, 1, 5));
        assert_eq!(range.end, date(2024, 1, 5));
    }

    #[test]
    fn half_parseable_range_degrades_to_unknown() {
        assert!(normalize("Jan 5 - mush").is_unknown());
        assert!(normalize("mush - Jan 7, 2024").is_unknown());
    }

    #[test]
    fn reversed_range_is_swapped() {
        let range = normalize("Jan 7, 2024 - Jan 5, 2024");
        assert_eq!(range.start, date(2024, 1, 5));
        assert_eq!(range.end, date(2024, 1, 7));
    }
}
