//! Tests for the price-index workbook parser
//!
//! Workbooks are generated in memory with rust_xlsxwriter so the fixtures
//! carry real date-formatted cells.

pub mod row_tests;

use crate::app::models::{Period, PeriodRange};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

/// A cell value for column 1 of a fixture row
pub enum ValueCell {
    Number(f64),
    Text(&'static str),
    Blank,
}

/// Build an xlsx buffer whose first sheet holds `(date, value)` rows
///
/// A `None` date writes a plain text cell instead of a date cell.
pub fn build_index_workbook(rows: &[(Option<(u16, u8, u8)>, ValueCell)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();

    for (row_idx, (date, value)) in rows.iter().enumerate() {
        let row = row_idx as u32;
        match date {
            Some((year, month, day)) => {
                let datetime = ExcelDateTime::from_ymd(*year, *month, *day).unwrap();
                worksheet
                    .write_datetime_with_format(row, 0, &datetime, &date_format)
                    .unwrap();
            }
            None => {
                worksheet.write_string(row, 0, "Fecha").unwrap();
            }
        }
        match value {
            ValueCell::Number(n) => {
                worksheet.write_number(row, 1, *n).unwrap();
            }
            ValueCell::Text(s) => {
                worksheet.write_string(row, 1, *s).unwrap();
            }
            ValueCell::Blank => {}
        }
    }

    workbook.save_to_buffer().unwrap()
}

pub fn p(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

pub fn range(from: Period, to: Period) -> PeriodRange {
    PeriodRange::new(from, to)
}
