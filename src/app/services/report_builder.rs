//! Report pipeline orchestration
//!
//! Runs parse → filter → join → pivot over the raw uploaded buffers and
//! reports the result as a tagged [`ReportOutcome`]. The builder is
//! synchronous and holds no state between calls; callers on an async
//! runtime should run it on a blocking thread.

use crate::Result;
use crate::app::models::{
    AccountRecord, BalanceRecord, EntityRecord, Extraction, PivotedReport,
};
use crate::app::services::catalog_parser::{parse_accounts, parse_entities};
use crate::app::services::filter::ReportFilters;
use crate::app::services::index_parser::parse_index;
use crate::app::services::join_resolver::{AccountIndex, EntityIndex, combine};
use crate::app::services::ledger_parser::parse_ledger;
use crate::app::services::pivot_engine::pivot;
use crate::app::services::report_writer::{serialize_report, suggested_filename};
use crate::config::ReportConfig;
use tracing::{debug, info};

/// Raw contents of the four uploaded sources
#[derive(Debug, Clone, Default)]
pub struct SourceFiles {
    pub balhist: Vec<u8>,
    pub cuentas: Vec<u8>,
    pub nomina: Vec<u8>,
    /// The price-index workbook is optional
    pub indices: Option<Vec<u8>>,
}

/// Why a report has no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The ledger range ends before it starts
    InvertedRange,
    /// No ledger row matched the entity and range
    NoRowsMatched,
}

/// Result of a report request that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Ready(PivotedReport),
    NoMatchingRecords(EmptyReason),
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&PivotedReport> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            ReportOutcome::NoMatchingRecords(_) => None,
        }
    }
}

/// Build the pivoted report from raw source buffers
///
/// The price index is parsed when both the workbook and its range are given.
/// Its records are logged only; they take no part in the report.
pub fn build_report(
    sources: &SourceFiles,
    filters: &ReportFilters,
    config: &ReportConfig,
) -> Result<ReportOutcome> {
    info!(
        "Building report for entity {} over {}",
        filters.entity_id(),
        filters.balance_range()
    );

    let balances = parse_ledger(&sources.balhist, &filters.balances);
    let accounts = parse_accounts(&sources.cuentas);
    let entities = parse_entities(&sources.nomina);

    if let (Some(workbook), Some(range)) = (&sources.indices, &filters.index) {
        let indices = parse_index(workbook, range);
        debug!(
            "Parsed {} price-index records for {}",
            indices.records().len(),
            range
        );
    }

    Ok(assemble(
        balances,
        accounts.records,
        entities.records,
        filters,
        config,
    ))
}

/// A serialized report, or the reason there is none
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedReport {
    Workbook {
        filename: String,
        bytes: Vec<u8>,
        rows: usize,
        months: usize,
    },
    NoMatchingRecords(EmptyReason),
}

/// Build the report and serialize it to an xlsx buffer
pub fn render_report(
    sources: &SourceFiles,
    filters: &ReportFilters,
    config: &ReportConfig,
) -> Result<RenderedReport> {
    match build_report(sources, filters, config)? {
        ReportOutcome::Ready(report) => Ok(RenderedReport::Workbook {
            filename: suggested_filename(report.entity_id, config),
            bytes: serialize_report(&report, config)?,
            rows: report.row_count(),
            months: report.month_count(),
        }),
        ReportOutcome::NoMatchingRecords(reason) => Ok(RenderedReport::NoMatchingRecords(reason)),
    }
}

/// Join and pivot already-parsed records
pub fn assemble(
    balances: Extraction<BalanceRecord>,
    accounts: Vec<AccountRecord>,
    entities: Vec<EntityRecord>,
    filters: &ReportFilters,
    config: &ReportConfig,
) -> ReportOutcome {
    let balances = match balances {
        Extraction::InvertedRange(_) => {
            return ReportOutcome::NoMatchingRecords(EmptyReason::InvertedRange);
        }
        other => other.into_records(),
    };

    if balances.is_empty() {
        info!(
            "No balance records for entity {} over {}",
            filters.entity_id(),
            filters.balance_range()
        );
        return ReportOutcome::NoMatchingRecords(EmptyReason::NoRowsMatched);
    }

    let account_index = AccountIndex::build(accounts);
    let entity_index = EntityIndex::build(entities);
    debug!(
        "Lookup indices: {} accounts, {} entities",
        account_index.len(),
        entity_index.len()
    );

    let combined = combine(
        balances,
        &account_index,
        &entity_index,
        &config.not_found_label,
    );

    match pivot(&combined, &filters.balance_range()) {
        Some(report) => ReportOutcome::Ready(report),
        None => ReportOutcome::NoMatchingRecords(EmptyReason::NoRowsMatched),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{ParseStats, Parsed, Period, PeriodRange};
    use crate::app::services::filter::BalanceFilter;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn filters(entity_id: u32, from: Period, to: Period) -> ReportFilters {
        ReportFilters::new(BalanceFilter::new(entity_id, PeriodRange::new(from, to)), None)
    }

    fn sources() -> SourceFiles {
        SourceFiles {
            balhist: b"15\t202401\t1101\t100\n\
                       15\t202402\t1101\t150\n\
                       15\t202402\t2100\t-40\n\
                       22\t202401\t1101\t999\n"
                .to_vec(),
            cuentas: b"1101\tCaja\t/  /\n".to_vec(),
            nomina: b"15\tBanco del Sur\tSUR\n22\tBanco del Norte\tNORTE\n".to_vec(),
            indices: None,
        }
    }

    #[test]
    fn test_build_report_end_to_end() {
        let outcome = build_report(
            &sources(),
            &filters(15, p(2024, 1), p(2024, 3)),
            &ReportConfig::default(),
        )
        .unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.entity_id, 15);
        assert_eq!(report.month_count(), 3);
        assert_eq!(report.row_count(), 2);

        assert_eq!(report.rows[0].account_number, 1101);
        assert_eq!(report.rows[0].account_description, "Caja");
        assert_eq!(report.rows[0].balances, vec![100, 150, 0]);
        assert_eq!(
            report.rows[0].entity.as_ref().unwrap().entity_name,
            "Banco del Sur"
        );

        assert_eq!(report.rows[1].account_number, 2100);
        assert_eq!(report.rows[1].account_description, "No encontrada");
        assert_eq!(report.rows[1].balances, vec![0, -40, 0]);
        assert!(report.rows[1].entity.is_none());
    }

    #[test]
    fn test_build_report_no_matching_records() {
        let outcome = build_report(
            &sources(),
            &filters(99, p(2024, 1), p(2024, 3)),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(
            outcome,
            ReportOutcome::NoMatchingRecords(EmptyReason::NoRowsMatched)
        );
    }

    #[test]
    fn test_build_report_inverted_range() {
        let outcome = build_report(
            &sources(),
            &filters(15, p(2024, 3), p(2024, 1)),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(
            outcome,
            ReportOutcome::NoMatchingRecords(EmptyReason::InvertedRange)
        );
    }

    #[test]
    fn test_build_report_ignores_unreadable_index() {
        let mut files = sources();
        files.indices = Some(b"garbage".to_vec());
        let mut request = filters(15, p(2024, 1), p(2024, 1));
        request.index = Some(PeriodRange::new(p(2020, 1), p(2020, 12)));

        let outcome = build_report(&files, &request, &ReportConfig::default()).unwrap();
        assert!(outcome.report().is_some());
    }

    #[test]
    fn test_render_report() {
        let config = ReportConfig::default();

        let rendered = render_report(&sources(), &filters(15, p(2024, 1), p(2024, 2)), &config)
            .unwrap();
        match rendered {
            RenderedReport::Workbook {
                filename,
                bytes,
                rows,
                months,
            } => {
                assert_eq!(filename, "Reporte_Pivoteado_Entidad_15.xlsx");
                assert!(bytes.starts_with(b"PK"));
                assert_eq!(rows, 2);
                assert_eq!(months, 2);
            }
            other => panic!("expected a workbook, got {:?}", other),
        }

        let rendered = render_report(&sources(), &filters(40, p(2024, 1), p(2024, 2)), &config)
            .unwrap();
        assert_eq!(
            rendered,
            RenderedReport::NoMatchingRecords(EmptyReason::NoRowsMatched)
        );
    }

    #[test]
    fn test_assemble_uses_configured_label() {
        let balances = Extraction::Rows(Parsed::new(
            vec![BalanceRecord {
                entity_id: 1,
                account_number: 5,
                period: p(2024, 1),
                balance: 7,
            }],
            ParseStats::new(),
        ));
        let config = ReportConfig {
            not_found_label: "N/D".to_string(),
            ..ReportConfig::default()
        };

        let outcome = assemble(
            balances,
            Vec::new(),
            Vec::new(),
            &filters(1, p(2024, 1), p(2024, 1)),
            &config,
        );

        let report = outcome.report().unwrap();
        assert_eq!(report.rows[0].account_description, "N/D");
        assert_eq!(report.rows[0].entity.as_ref().unwrap().entity_name, "N/D");
    }
}
