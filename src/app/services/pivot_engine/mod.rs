//! Long-to-wide reshape of joined balances
//!
//! Turns one row per account and month into one row per account with a
//! column per month of the requested range:
//!
//! - [`months`] - Inclusive month-column sequence
//! - [`buckets`] - Per-account grouping of balances
//!
//! Rows come out sorted by account number. Only the first row carries the
//! entity id and name, mimicking a grouped report.

pub mod buckets;
pub mod months;


pub use buckets::{PivotBucket, group_by_account};
pub use months::month_range;

use crate::app::models::{CombinedRecord, EntityHeading, PeriodRange, PivotedReport, ReportRow};
use tracing::debug;

/// Pivot joined balances over the given month range
///
/// Returns `None` when there are no balances: an empty pivot is not a report.
pub fn pivot(records: &[CombinedRecord], range: &PeriodRange) -> Option<PivotedReport> {
    let first = records.first()?;
    let heading = EntityHeading {
        entity_id: first.entity_id,
        entity_name: first.entity_name.clone(),
    };

    let buckets = group_by_account(records);
    let months = month_range(range.from, range.to);

    let rows: Vec<ReportRow> = buckets
        .into_iter()
        .enumerate()
        .map(|(position, (account_number, bucket))| ReportRow {
            entity: (position == 0).then(|| heading.clone()),
            account_number,
            balances: bucket.balances_for(&months),
            account_description: bucket.description,
        })
        .collect();

    debug!(
        "Pivoted {} balances into {} accounts x {} months",
        records.len(),
        rows.len(),
        months.len()
    );

    Some(PivotedReport {
        entity_id: heading.entity_id,
        months,
        rows,
    })
}
