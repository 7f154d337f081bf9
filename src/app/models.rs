//! Core data structures for the balance report pipeline.
//!
//! Defines the calendar month type, the record shapes produced by each
//! parser, the joined and pivoted shapes consumed by the writer, and the
//! tagged parse outcomes used instead of overloading empty collections.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month
///
/// Field order matters: the derived ordering compares the year first, which
/// matches the chronological (and zero-padded `YYYY-MM` lexicographic) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1..=12 and years outside 0..=9999
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (0..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Parse the ledger's compact `YYYYMM` form
    ///
    /// Only the first six characters are read; they must all be digits.
    pub fn from_compact(value: &str) -> Option<Self> {
        let head = value.get(..6)?;
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = head[..4].parse().ok()?;
        let month = head[4..].parse().ok()?;
        Self::new(year, month)
    }

    /// Parse the `YYYY-MM` form used by month pickers
    pub fn from_iso_month(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Period containing the given date
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    /// The following calendar month
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Sortable `YYYY-MM` key
    pub fn iso_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Displays as `MM-YYYY`, the form used in report column headers
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

/// Inclusive range of months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub from: Period,
    pub to: Period,
}

impl PeriodRange {
    pub fn new(from: Period, to: Period) -> Self {
        Self { from, to }
    }

    /// True when `from` falls after `to`; such a range matches nothing
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, period: Period) -> bool {
        self.from <= period && period <= self.to
    }

    /// Number of months in the range, 0 when inverted
    pub fn month_count(&self) -> u64 {
        let index = |p: Period| i64::from(p.year) * 12 + i64::from(p.month) - 1;
        u64::try_from(index(self.to) - index(self.from) + 1).unwrap_or(0)
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from.iso_key(), self.to.iso_key())
    }
}

/// One monthly balance of one account of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub entity_id: u32,
    pub account_number: u64,
    pub period: Period,
    pub balance: i64,
}

/// Account catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: u64,
    pub description: String,
    /// `None` while the account is open
    pub closed_date: Option<String>,
}

/// Entity roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub entity_id: u32,
    pub full_name: String,
    pub short_name: String,
}

/// Monthly price index value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub period: Period,
    pub cpi_index: f64,
}

/// Balance joined with its account description and entity name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub entity_id: u32,
    pub entity_name: String,
    pub account_number: u64,
    pub account_description: String,
    pub period: Period,
    pub balance: i64,
}

/// Entity identity printed on the first row of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHeading {
    pub entity_id: u32,
    pub entity_name: String,
}

/// One account row of the pivoted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Present on the first row of a report only
    pub entity: Option<EntityHeading>,
    pub account_number: u64,
    pub account_description: String,
    /// One balance per month column, in column order
    pub balances: Vec<i64>,
}

/// Wide-form report ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotedReport {
    pub entity_id: u32,
    pub months: Vec<Period>,
    pub rows: Vec<ReportRow>,
}

impl PivotedReport {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }
}

/// Per-source parsing counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-blank lines or worksheet rows examined
    pub lines_read: usize,
    /// Records returned to the caller
    pub records_kept: usize,
    /// Lines dropped because a required field was missing or unparsable
    pub skipped_malformed: usize,
    /// Well-formed rows dropped by the entity or period filter
    pub filtered_out: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} read, {} kept, {} malformed, {} filtered out",
            self.lines_read, self.records_kept, self.skipped_malformed, self.filtered_out
        )
    }
}

/// Records parsed from an unfiltered source
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub stats: ParseStats,
}

impl<T> Parsed<T> {
    pub fn new(records: Vec<T>, stats: ParseStats) -> Self {
        Self { records, stats }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of parsing a range-filtered source
///
/// Keeps "no rows matched" (an empty `Rows`) distinct from "the range could
/// never match" and "the container could not be read".
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Rows(Parsed<T>),
    InvertedRange(PeriodRange),
    Unreadable { reason: String },
}

impl<T> Extraction<T> {
    /// The extracted records, empty for the non-`Rows` outcomes
    pub fn into_records(self) -> Vec<T> {
        match self {
            Extraction::Rows(parsed) => parsed.records,
            Extraction::InvertedRange(_) | Extraction::Unreadable { .. } => Vec::new(),
        }
    }

    pub fn records(&self) -> &[T] {
        match self {
            Extraction::Rows(parsed) => &parsed.records,
            Extraction::InvertedRange(_) | Extraction::Unreadable { .. } => &[],
        }
    }

    pub fn stats(&self) -> Option<&ParseStats> {
        match self {
            Extraction::Rows(parsed) => Some(&parsed.stats),
            _ => None,
        }
    }

    pub fn is_inverted_range(&self) -> bool {
        matches!(self, Extraction::InvertedRange(_))
    }
}
