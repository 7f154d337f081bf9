//! Join of filtered balances with the account and entity catalogs
//!
//! Lookups are built from the full, unfiltered catalogs. A balance whose
//! account or entity is missing from its catalog is kept and labelled with
//! the configured "not found" text; the join never drops or duplicates rows.

use crate::app::models::{AccountRecord, BalanceRecord, CombinedRecord, EntityRecord};
use std::collections::HashMap;
use tracing::debug;

/// Account number → catalog entry, last duplicate wins
#[derive(Debug, Default)]
pub struct AccountIndex {
    accounts: HashMap<u64, AccountRecord>,
}

impl AccountIndex {
    pub fn build(records: impl IntoIterator<Item = AccountRecord>) -> Self {
        let accounts = records
            .into_iter()
            .map(|record| (record.account_number, record))
            .collect();
        Self { accounts }
    }

    pub fn get(&self, account_number: u64) -> Option<&AccountRecord> {
        self.accounts.get(&account_number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Entity id → roster entry, last duplicate wins
#[derive(Debug, Default)]
pub struct EntityIndex {
    entities: HashMap<u32, EntityRecord>,
}

impl EntityIndex {
    pub fn build(records: impl IntoIterator<Item = EntityRecord>) -> Self {
        let entities = records
            .into_iter()
            .map(|record| (record.entity_id, record))
            .collect();
        Self { entities }
    }

    pub fn get(&self, entity_id: u32) -> Option<&EntityRecord> {
        self.entities.get(&entity_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Enrich every balance with its account description and entity name
pub fn combine(
    balances: Vec<BalanceRecord>,
    accounts: &AccountIndex,
    entities: &EntityIndex,
    not_found_label: &str,
) -> Vec<CombinedRecord> {
    let mut missing_accounts = 0usize;
    let mut missing_entities = 0usize;

    let combined: Vec<CombinedRecord> = balances
        .into_iter()
        .map(|balance| {
            // A catalog entry with a blank text counts as missing.
            let account_description = match accounts
                .get(balance.account_number)
                .filter(|account| !account.description.is_empty())
            {
                Some(account) => account.description.clone(),
                None => {
                    missing_accounts += 1;
                    not_found_label.to_string()
                }
            };
            let entity_name = match entities
                .get(balance.entity_id)
                .filter(|entity| !entity.full_name.is_empty())
            {
                Some(entity) => entity.full_name.clone(),
                None => {
                    missing_entities += 1;
                    not_found_label.to_string()
                }
            };

            CombinedRecord {
                entity_id: balance.entity_id,
                entity_name,
                account_number: balance.account_number,
                account_description,
                period: balance.period,
                balance: balance.balance,
            }
        })
        .collect();

    debug!(
        "Joined {} balances ({} without account, {} without entity)",
        combined.len(),
        missing_accounts,
        missing_entities
    );

    combined
}
