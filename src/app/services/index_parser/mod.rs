//! Price-index workbook parser
//!
//! Reads the first worksheet of an xlsx, xls or ods workbook. Every row,
//! including row 0, is treated as data and must validate into a strict
//! `(date, value)` tuple before an [`IndexRecord`] is built:
//!
//! - [`row`] - Cell validation and locale-aware number parsing
//!
//! The resulting records are range-filtered but not joined into the report.

pub mod row;

#[cfg(test)]
pub mod tests;

use crate::app::models::{Extraction, IndexRecord, ParseStats, Parsed, PeriodRange};
use calamine::{Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use tracing::{debug, error, warn};

pub use row::{IndexRow, parse_locale_decimal};

/// Parse and range-filter the price-index workbook
///
/// Structural failures (not a workbook, no first sheet) are logged and
/// reported as [`Extraction::Unreadable`] instead of an error.
pub fn parse_index(bytes: &[u8], range: &PeriodRange) -> Extraction<IndexRecord> {
    if range.is_inverted() {
        warn!(
            "Index range {} is inverted: 'from' is after 'to', no index can match",
            range
        );
        return Extraction::InvertedRange(*range);
    }

    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(workbook) => workbook,
        Err(e) => return unreadable(format!("cannot open workbook: {}", e)),
    };

    let sheet = match workbook.worksheet_range_at(0) {
        Some(Ok(sheet)) => sheet,
        Some(Err(e)) => return unreadable(format!("cannot read first sheet: {}", e)),
        None => return unreadable("workbook has no sheets".to_string()),
    };

    if sheet.is_empty() {
        warn!("Index workbook was read but its first sheet holds no data");
        return Extraction::Rows(Parsed::new(Vec::new(), ParseStats::new()));
    }

    let mut stats = ParseStats::new();
    let mut records = Vec::new();

    for cells in sheet.rows() {
        stats.lines_read += 1;

        let Some(row) = IndexRow::from_cells(cells) else {
            stats.skipped_malformed += 1;
            continue;
        };

        if range.contains(row.period) {
            records.push(row.into_record());
        } else {
            stats.filtered_out += 1;
        }
    }

    stats.records_kept = records.len();
    debug!("Index workbook in {}: {}", range, stats.summary());

    Extraction::Rows(Parsed::new(records, stats))
}

fn unreadable(reason: String) -> Extraction<IndexRecord> {
    error!("Failed to read index workbook: {}", reason);
    Extraction::Unreadable { reason }
}
