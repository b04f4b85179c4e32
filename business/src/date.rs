//! Due-date parsing and badge classification.
//!
//! Dates arrive as free text typed into ticket descriptions, so parsing is
//! forgiving: ISO dates, `M/D` shorthand and a handful of common formats are
//! accepted, anything else falls back to a neutral badge.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// A `M/D` date more than this many days ahead is read as last year's date.
const YEAR_ROLLBACK_DAYS: i64 = 30;

/// Date-only formats tried after the strict ISO and `M/D` forms.
const FALLBACK_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Date-time formats without a timezone, read as local time.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Badge shown next to a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateBadge {
    Overdue,
    Today,
    Future,
    /// No date could be read.
    Neutral,
}

impl DateBadge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Future => "future",
            Self::Neutral => "neutral",
        }
    }
}

/// A due date as typed, plus the calendar date it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDate {
    pub date: Option<NaiveDate>,
    pub text: String,
}

impl ParsedDate {
    pub fn parse(input: &str, today: NaiveDate) -> Self {
        let text = input.trim().to_owned();
        Self {
            date: parse_date(&text, today),
            text,
        }
    }

    pub fn badge(&self, today: NaiveDate) -> DateBadge {
        classify(self.date, today)
    }
}

/// Parses a free-text date relative to `today`.
///
/// `M/D` has no year: the current year is assumed unless that puts the date more
/// than 30 days in the future, in which case it belongs to the previous year
/// (a `12/26` read in January).
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_iso_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    if let Some((month, day)) = month_day(trimmed) {
        let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
        if (date - today).num_days() > YEAR_ROLLBACK_DAYS {
            return NaiveDate::from_ymd_opt(today.year() - 1, month, day);
        }
        return Some(date);
    }

    parse_fallback(trimmed)
}

/// Compares a date with today at day granularity.
pub fn classify(date: Option<NaiveDate>, today: NaiveDate) -> DateBadge {
    match date {
        None => DateBadge::Neutral,
        Some(date) if date < today => DateBadge::Overdue,
        Some(date) if date == today => DateBadge::Today,
        Some(_) => DateBadge::Future,
    }
}

/// `MM/DD/YYYY`, the layout used in the loaner table.
pub fn format_us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

fn month_day(s: &str) -> Option<(u32, u32)> {
    let (month, day) = s.split_once('/')?;
    let is_short_number = |part: &str| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit());
    if !is_short_number(month) || !is_short_number(day) {
        return None;
    }
    Some((month.parse().ok()?, day.parse().ok()?))
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Some(dt) = FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
