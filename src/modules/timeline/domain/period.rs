// src/modules/timeline/domain/period.rs
//
// Period strings are what the admin types and what the timeline renders:
// "Mar 2025 - Jan 2026", or "Mar 2025 - PRESENT" for an ongoing role.
// The backend stores real dates, so these helpers convert both ways.

use chrono::NaiveDate;
use thiserror::Error;

/// Literal end marker meaning "ongoing, no end date".
pub const PRESENT: &str = "PRESENT";

const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("unrecognized date \"{0}\", expected \"Mon YYYY\" (e.g. \"Mar 2025\")")]
    UnparseableDate(String),
}

/// Raw halves of a period string, before any date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParts {
    pub start_label: String,
    pub end_label: String,
    pub is_ongoing: bool,
}

/// Splits on the literal `" - "` separator. A string without the separator
/// is treated as a start label with an empty end.
pub fn parse_period(text: &str) -> PeriodParts {
    match text.split_once(SEPARATOR) {
        Some((start, end)) => {
            let end = end.trim();
            PeriodParts {
                start_label: start.trim().to_string(),
                end_label: end.to_string(),
                is_ongoing: end.eq_ignore_ascii_case(PRESENT),
            }
        }
        None => PeriodParts {
            start_label: text.trim().to_string(),
            end_label: String::new(),
            is_ongoing: false,
        },
    }
}

/// Parses a `"Mon YYYY"` label into the first day of that month. The month
/// abbreviation is matched case-insensitively. Malformed labels are rejected
/// outright; substituting the current date here would quietly rewrite a
/// historical entry.
pub fn parse_label(label: &str) -> Result<NaiveDate, PeriodError> {
    let trimmed = label.trim();
    NaiveDate::parse_from_str(&format!("{trimmed} 1"), "%b %Y %d")
        .map_err(|_| PeriodError::UnparseableDate(trimmed.to_string()))
}

/// Renders a date as `"Mon YYYY"` with English month abbreviations, so a
/// formatted label always parses back regardless of locale.
pub fn format_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Structured form of a period: a start month and an optional end month.
/// A missing end means the entry is still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl PeriodRange {
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }
}

/// Full parse of a display period into dates. The PRESENT sentinel and a
/// missing end portion both map to an open range.
pub fn parse_range(text: &str) -> Result<PeriodRange, PeriodError> {
    let parts = parse_period(text);
    let start = parse_label(&parts.start_label)?;
    let end = if parts.is_ongoing || parts.end_label.is_empty() {
        None
    } else {
        Some(parse_label(&parts.end_label)?)
    };
    Ok(PeriodRange { start, end })
}

/// Inverse of `parse_range`: an open range renders with the PRESENT
/// sentinel so the round trip is stable.
pub fn compose_range(range: &PeriodRange) -> String {
    match range.end {
        Some(end) => format!("{}{SEPARATOR}{}", format_label(range.start), format_label(end)),
        None => format!("{}{SEPARATOR}{PRESENT}", format_label(range.start)),
    }
}
