//! Per-account grouping of joined balances

use crate::app::models::{CombinedRecord, Period};
use std::collections::{BTreeMap, HashMap};

/// Balances of one account, keyed by month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotBucket {
    pub description: String,
    pub balances: HashMap<Period, i64>,
}

impl PivotBucket {
    /// Balances aligned with `months`, 0 where the month has no balance
    pub fn balances_for(&self, months: &[Period]) -> Vec<i64> {
        months
            .iter()
            .map(|month| self.balances.get(month).copied().unwrap_or(0))
            .collect()
    }
}

/// Group balances by account number, ascending
///
/// Later records overwrite earlier ones, both for the description and for a
/// repeated month of the same account.
pub fn group_by_account(records: &[CombinedRecord]) -> BTreeMap<u64, PivotBucket> {
    let mut buckets: BTreeMap<u64, PivotBucket> = BTreeMap::new();
    for record in records {
        let bucket = buckets.entry(record.account_number).or_default();
        bucket.description.clone_from(&record.account_description);
        bucket.balances.insert(record.period, record.balance);
    }
    buckets
}
