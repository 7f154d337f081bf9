//! Strict row schema for the price-index worksheet

use crate::app::models::{IndexRecord, Period};
use calamine::{Data, DataType};
use chrono::NaiveDate;

/// A worksheet row that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRow {
    pub period: Period,
    pub value: f64,
}

impl IndexRow {
    /// Validate the first two cells of a row
    ///
    /// Column 0 must be a date cell and column 1 a number, either numeric or
    /// text using a comma as decimal separator.
    pub fn from_cells(cells: &[Data]) -> Option<Self> {
        let [date, value, ..] = cells else {
            return None;
        };

        Some(Self {
            period: Period::from_date(date_cell(date)?)?,
            value: value_cell(value)?,
        })
    }

    pub fn into_record(self) -> IndexRecord {
        IndexRecord {
            period: self.period,
            cpi_index: self.value,
        }
    }
}

/// Date of a date-typed cell
///
/// Serial dates are resolved by calamine, which honours the workbook's 1900
/// or 1904 date system. Plain numbers are not accepted as dates.
pub fn date_cell(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(datetime) => datetime.as_datetime().map(|dt| dt.date()),
        Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

fn value_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => parse_locale_decimal(text),
        _ => None,
    }
    .filter(|value| value.is_finite())
}

/// Parse a decimal written with a comma separator, e.g. `"3,14"`
///
/// Only the first comma is treated as the decimal separator; plain
/// dot-decimal text parses as well.
pub fn parse_locale_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}
