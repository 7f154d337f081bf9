//! Tests for report serialization, read back through calamine

use super::*;
use crate::app::models::{EntityHeading, Period};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;

fn p(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

fn sample_report() -> PivotedReport {
    PivotedReport {
        entity_id: 15,
        months: vec![p(2023, 12), p(2024, 1)],
        rows: vec![
            ReportRow {
                entity: Some(EntityHeading {
                    entity_id: 15,
                    entity_name: "Banco del Sur".to_string(),
                }),
                account_number: 1101,
                account_description: "Caja".to_string(),
                balances: vec![100, 0],
            },
            ReportRow {
                entity: None,
                account_number: 2100,
                account_description: "Depósitos".to_string(),
                balances: vec![-5, 250],
            },
        ],
    }
}

fn read_back(bytes: Vec<u8>) -> (Vec<String>, Range<Data>) {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let names = workbook.sheet_names().to_vec();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    (names, range)
}

#[test]
fn test_serialize_report_layout() {
    let config = ReportConfig::default();
    let bytes = serialize_report(&sample_report(), &config).unwrap();
    let (names, range) = read_back(bytes);

    assert_eq!(names, vec!["Balance Pivoteado".to_string()]);
    assert_eq!(range.get_size(), (3, 6));

    let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        header,
        vec![
            "Entidad",
            "Nombre Entidad",
            "Cuenta",
            "Descripción Cuenta",
            "12-2023",
            "01-2024"
        ]
    );
}

#[test]
fn test_serialize_report_values() {
    let bytes = serialize_report(&sample_report(), &ReportConfig::default()).unwrap();
    let (_, range) = read_back(bytes);

    assert_eq!(range.get((1, 0)), Some(&Data::Float(15.0)));
    assert_eq!(range.get((1, 1)), Some(&Data::String("Banco del Sur".to_string())));
    assert_eq!(range.get((1, 2)), Some(&Data::Float(1101.0)));
    assert_eq!(range.get((1, 4)), Some(&Data::Float(100.0)));
    assert_eq!(range.get((1, 5)), Some(&Data::Float(0.0)));

    assert_eq!(range.get((2, 0)), Some(&Data::Empty));
    assert_eq!(range.get((2, 1)), Some(&Data::Empty));
    assert_eq!(range.get((2, 3)), Some(&Data::String("Depósitos".to_string())));
    assert_eq!(range.get((2, 4)), Some(&Data::Float(-5.0)));
}

#[test]
fn test_serialize_report_uses_configured_sheet_name() {
    let config = ReportConfig {
        sheet_name: "Saldos".to_string(),
        ..ReportConfig::default()
    };
    let bytes = serialize_report(&sample_report(), &config).unwrap();
    let (names, _) = read_back(bytes);
    assert_eq!(names, vec!["Saldos".to_string()]);
}

#[test]
fn test_suggested_filename() {
    let config = ReportConfig::default();
    assert_eq!(suggested_filename(15, &config), "Reporte_Pivoteado_Entidad_15.xlsx");
}

#[test]
fn test_month_column_limit() {
    assert_eq!(month_column(0).unwrap(), 4);
    assert_eq!(month_column(16_379).unwrap(), 16_383);
    assert!(month_column(16_380).unwrap_err().is_client_error());
    assert!(month_column(usize::MAX).is_err());
}
