//! Account catalog and entity roster parsers
//!
//! Both catalogs are loaded in full; they are lookup sources for the join and
//! are never filtered.

use crate::app::models::{AccountRecord, EntityRecord, ParseStats, Parsed};
use crate::app::services::text_source::{
    clean_field, data_lines, decode_latin1, parse_identifier, required_field, split_fields,
};
use crate::constants::EMPTY_DATE_SENTINEL;
use tracing::debug;

/// Parse the account catalog: `account_number  description  [closed_date]`
pub fn parse_accounts(bytes: &[u8]) -> Parsed<AccountRecord> {
    let parsed = parse_catalog(bytes, parse_account_line);
    debug!("Account catalog: {}", parsed.stats.summary());
    parsed
}

/// Parse the entity roster: `entity_id  full_name  short_name`
pub fn parse_entities(bytes: &[u8]) -> Parsed<EntityRecord> {
    let parsed = parse_catalog(bytes, parse_entity_line);
    debug!("Entity roster: {}", parsed.stats.summary());
    parsed
}

fn parse_catalog<T>(bytes: &[u8], parse_line: fn(&str) -> Option<T>) -> Parsed<T> {
    let content = decode_latin1(bytes);
    let mut stats = ParseStats::new();
    let mut records = Vec::new();

    for line in data_lines(&content) {
        stats.lines_read += 1;
        match parse_line(line) {
            Some(record) => records.push(record),
            None => stats.skipped_malformed += 1,
        }
    }

    stats.records_kept = records.len();
    Parsed::new(records, stats)
}

pub fn parse_account_line(line: &str) -> Option<AccountRecord> {
    let fields = split_fields(line);
    let number = required_field(&fields, 0)?;
    let description = required_field(&fields, 1)?;

    Some(AccountRecord {
        account_number: parse_identifier(number)?,
        description: clean_field(description),
        closed_date: fields.get(2).and_then(|raw| normalize_closed_date(raw)),
    })
}

pub fn parse_entity_line(line: &str) -> Option<EntityRecord> {
    let fields = split_fields(line);
    let id = required_field(&fields, 0)?;
    let full_name = required_field(&fields, 1)?;
    let short_name = required_field(&fields, 2)?;

    Some(EntityRecord {
        entity_id: parse_identifier(id)?,
        full_name: clean_field(full_name),
        short_name: clean_field(short_name),
    })
}

/// `None` for open accounts: blank dates and the `/  /` placeholder
fn normalize_closed_date(raw: &str) -> Option<String> {
    let date = clean_field(raw);
    if date.is_empty() || date == EMPTY_DATE_SENTINEL {
        None
    } else {
        Some(date)
    }
}
