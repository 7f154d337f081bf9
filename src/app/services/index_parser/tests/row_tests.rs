//! Tests for index row validation

use crate::app::services::index_parser::row::{IndexRow, date_cell, parse_locale_decimal};
use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
use chrono::NaiveDate;

#[test]
fn test_parse_locale_decimal() {
    assert_eq!(parse_locale_decimal("3,14"), Some(3.14));
    assert_eq!(parse_locale_decimal(" 120,5 "), Some(120.5));
    assert_eq!(parse_locale_decimal("98.7"), Some(98.7));
    assert_eq!(parse_locale_decimal("42"), Some(42.0));
    assert_eq!(parse_locale_decimal(""), None);
    assert_eq!(parse_locale_decimal("1,2,3"), None);
    assert_eq!(parse_locale_decimal("abc"), None);
}

fn serial_cell(serial: f64, is_1904: bool) -> Data {
    Data::DateTime(ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, is_1904))
}

#[test]
fn test_date_cell_1900_system() {
    assert_eq!(
        date_cell(&serial_cell(45292.0, false)),
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );
    assert_eq!(
        date_cell(&serial_cell(45292.75, false)),
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );
}

#[test]
fn test_date_cell_1904_system() {
    assert_eq!(
        date_cell(&serial_cell(0.0, true)),
        NaiveDate::from_ymd_opt(1904, 1, 1)
    );
    // Same serial, four years and a day later than in the 1900 system
    assert_eq!(
        date_cell(&serial_cell(43830.0, true)),
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );

    let cells = [serial_cell(43830.0, true), Data::Float(2.5)];
    let row = IndexRow::from_cells(&cells).unwrap();
    assert_eq!(row.period.to_string(), "01-2024");
}

#[test]
fn test_date_cell_rejects_plain_numbers() {
    assert_eq!(date_cell(&Data::Float(45292.0)), None);
    assert_eq!(date_cell(&Data::Int(45292)), None);
    assert_eq!(date_cell(&Data::Empty), None);
}

#[test]
fn test_row_requires_date_cell() {
    let cells = [Data::Float(45292.0), Data::Float(1.5)];
    assert!(IndexRow::from_cells(&cells).is_none());

    let cells = [Data::String("2024-01-01".to_string()), Data::Float(1.5)];
    assert!(IndexRow::from_cells(&cells).is_none());
}

#[test]
fn test_row_accepts_iso_date_cell() {
    let cells = [
        Data::DateTimeIso("2023-11-05T00:00:00".to_string()),
        Data::String("4,25".to_string()),
    ];
    let row = IndexRow::from_cells(&cells).unwrap();
    assert_eq!(row.period.to_string(), "11-2023");
    assert_eq!(row.value, 4.25);
}

#[test]
fn test_row_requires_two_cells() {
    let cells = [Data::DateTimeIso("2023-11-05".to_string())];
    assert!(IndexRow::from_cells(&cells).is_none());
    assert!(IndexRow::from_cells(&[]).is_none());
}

#[test]
fn test_row_rejects_empty_value() {
    let cells = [Data::DateTimeIso("2023-11-05".to_string()), Data::Empty];
    assert!(IndexRow::from_cells(&cells).is_none());
}
