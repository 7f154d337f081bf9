//! Entity and period filters
//!
//! Filter values arrive as the raw strings of the upload form (or the
//! command line). They are validated here once, so the parsers only ever
//! see typed periods and ids.

use crate::app::models::{BalanceRecord, Period, PeriodRange};
use crate::constants::{MAX_MONTH_COLUMNS, fields};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static MONTH_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}$").expect("month input pattern is valid")
});

/// Predicate applied to every ledger row while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceFilter {
    pub entity_id: u32,
    pub range: PeriodRange,
}

impl BalanceFilter {
    pub fn new(entity_id: u32, range: PeriodRange) -> Self {
        Self { entity_id, range }
    }

    pub fn matches(&self, entity_id: u32, period: Period) -> bool {
        entity_id == self.entity_id && self.range.contains(period)
    }

    pub fn matches_record(&self, record: &BalanceRecord) -> bool {
        self.matches(record.entity_id, record.period)
    }
}

/// All filters of one report request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilters {
    pub balances: BalanceFilter,
    /// Range for the price-index workbook, independent of the ledger range
    pub index: Option<PeriodRange>,
}

impl ReportFilters {
    pub fn new(balances: BalanceFilter, index: Option<PeriodRange>) -> Self {
        Self { balances, index }
    }

    pub fn entity_id(&self) -> u32 {
        self.balances.entity_id
    }

    pub fn balance_range(&self) -> PeriodRange {
        self.balances.range
    }

    /// Build filters from the raw form values
    ///
    /// The index range is optional as a whole: it is set only when both of
    /// its bounds are supplied and non-blank.
    pub fn from_raw(
        entity: &str,
        balances_from: &str,
        balances_to: &str,
        index_from: Option<&str>,
        index_to: Option<&str>,
    ) -> Result<Self> {
        let entity_id = parse_entity(entity)?;
        let range = PeriodRange::new(
            parse_month(fields::BALHIST_DESDE, balances_from)?,
            parse_month(fields::BALHIST_HASTA, balances_to)?,
        );
        if range.month_count() > MAX_MONTH_COLUMNS {
            return Err(Error::invalid_filter(
                fields::BALHIST_HASTA,
                balances_to.trim(),
                format!("range spans more than {} months", MAX_MONTH_COLUMNS),
            ));
        }

        let index = match (non_blank(index_from), non_blank(index_to)) {
            (Some(from), Some(to)) => Some(PeriodRange::new(
                parse_month(fields::INDICES_DESDE, from)?,
                parse_month(fields::INDICES_HASTA, to)?,
            )),
            _ => None,
        };

        Ok(Self::new(BalanceFilter::new(entity_id, range), index))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse the entity filter as a non-negative decimal integer
pub fn parse_entity(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    trimmed.parse::<u32>().map_err(|e| {
        Error::invalid_filter(
            fields::ENTIDAD,
            trimmed,
            format!("expected a non-negative entity number ({})", e),
        )
    })
}

/// Parse a `YYYY-MM` month filter
pub fn parse_month(field: &str, value: &str) -> Result<Period> {
    let trimmed = value.trim();
    if !MONTH_INPUT.is_match(trimmed) {
        return Err(Error::invalid_filter(field, trimmed, "expected YYYY-MM"));
    }
    Period::from_iso_month(trimmed)
        .ok_or_else(|| Error::invalid_filter(field, trimmed, "month must be between 01 and 12"))
}
