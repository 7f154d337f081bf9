//! Balance-history ledger parser
//!
//! Each ledger line holds four tab-separated fields:
//!
//! ```text
//! entity_id  YYYYMM  account_number  balance
//! ```
//!
//! Lines missing a field or carrying an unparsable value are skipped, and the
//! entity/period filter is applied while reading so that rows of other
//! entities are never materialized.

use crate::app::models::{BalanceRecord, Extraction, ParseStats, Parsed, Period};
use crate::app::services::filter::BalanceFilter;
use crate::app::services::text_source::{
    clean_field, data_lines, decode_latin1, parse_identifier, parse_leading_int, required_field,
    split_fields,
};
use tracing::{debug, warn};

/// Parse and filter ledger bytes
///
/// An inverted range yields [`Extraction::InvertedRange`] without reading the
/// input at all.
pub fn parse_ledger(bytes: &[u8], filter: &BalanceFilter) -> Extraction<BalanceRecord> {
    if filter.range.is_inverted() {
        warn!(
            "Ledger range {} is inverted: 'from' is after 'to', no balance can match",
            filter.range
        );
        return Extraction::InvertedRange(filter.range);
    }

    let content = decode_latin1(bytes);
    let mut stats = ParseStats::new();
    let mut records = Vec::new();

    for line in data_lines(&content) {
        stats.lines_read += 1;

        let Some(record) = parse_balance_line(line) else {
            stats.skipped_malformed += 1;
            continue;
        };

        if filter.matches_record(&record) {
            records.push(record);
        } else {
            stats.filtered_out += 1;
        }
    }

    stats.records_kept = records.len();
    debug!(
        "Ledger for entity {} in {}: {}",
        filter.entity_id,
        filter.range,
        stats.summary()
    );

    Extraction::Rows(Parsed::new(records, stats))
}

/// Parse one ledger line, `None` when it is malformed
pub fn parse_balance_line(line: &str) -> Option<BalanceRecord> {
    let fields = split_fields(line);

    let entity = required_field(&fields, 0)?;
    let period = required_field(&fields, 1)?;
    let account = required_field(&fields, 2)?;
    // The balance may be present but blank; that fails the numeric parse below.
    let balance = fields.get(3)?;

    Some(BalanceRecord {
        entity_id: parse_identifier(entity)?,
        account_number: parse_identifier(account)?,
        period: Period::from_compact(&clean_field(period))?,
        balance: parse_leading_int(balance)?,
    })
}
