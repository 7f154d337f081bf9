//! xlsx serialization of the pivoted report
//!
//! Writes a single worksheet: four fixed columns (entity, entity name,
//! account, account description) followed by one `MM-YYYY` column per month.

#[cfg(test)]
pub mod tests;

use crate::app::models::{PivotedReport, ReportRow};
use crate::config::ReportConfig;
use crate::constants::{MAX_MONTH_COLUMNS, REPORT_EXTENSION, fields};
use crate::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

const FIXED_COLUMNS: u16 = 4;

/// Render the report into an in-memory xlsx workbook
pub fn serialize_report(report: &PivotedReport, config: &ReportConfig) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;

    write_header(worksheet, report, config)?;
    for (index, row) in report.rows.iter().enumerate() {
        write_row(worksheet, index as u32 + 1, row)?;
    }

    let buffer = workbook.save_to_buffer()?;
    debug!(
        "Serialized report for entity {}: {} rows, {} month columns, {} bytes",
        report.entity_id,
        report.row_count(),
        report.month_count(),
        buffer.len()
    );
    Ok(buffer)
}

/// Filename offered to the client for the report of `entity_id`
pub fn suggested_filename(entity_id: u32, config: &ReportConfig) -> String {
    format!("{}{}.{}", config.filename_prefix, entity_id, REPORT_EXTENSION)
}

fn write_header(
    worksheet: &mut Worksheet,
    report: &PivotedReport,
    config: &ReportConfig,
) -> Result<()> {
    let bold = Format::new().set_bold();
    let headers = &config.headers;
    let fixed = [
        &headers.entity,
        &headers.entity_name,
        &headers.account,
        &headers.account_description,
    ];

    for (col, title) in fixed.into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title.as_str(), &bold)?;
    }
    for (offset, month) in report.months.iter().enumerate() {
        let col = month_column(offset)?;
        worksheet.write_string_with_format(0, col, month.to_string(), &bold)?;
    }
    Ok(())
}

/// Sheet column of the month at `offset`
fn month_column(offset: usize) -> Result<u16> {
    u16::try_from(offset)
        .ok()
        .filter(|offset| u64::from(*offset) < MAX_MONTH_COLUMNS)
        .map(|offset| FIXED_COLUMNS + offset)
        .ok_or_else(|| {
            Error::invalid_filter(
                fields::BALHIST_HASTA,
                offset.to_string(),
                format!("range spans more than {} months", MAX_MONTH_COLUMNS),
            )
        })
}

fn write_row(worksheet: &mut Worksheet, row_num: u32, row: &ReportRow) -> Result<()> {
    // Blank entity cells on every row but the first are simply left unwritten.
    if let Some(entity) = &row.entity {
        worksheet.write_number(row_num, 0, f64::from(entity.entity_id))?;
        worksheet.write_string(row_num, 1, entity.entity_name.as_str())?;
    }
    worksheet.write_number(row_num, 2, row.account_number as f64)?;
    worksheet.write_string(row_num, 3, row.account_description.as_str())?;

    for (offset, balance) in row.balances.iter().enumerate() {
        let col = month_column(offset)?;
        worksheet.write_number(row_num, col, *balance as f64)?;
    }
    Ok(())
}
