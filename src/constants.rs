//! Application constants for the balance report
//!
//! This module contains the upload field names, sentinels, default labels
//! and server defaults used throughout the application.

// =============================================================================
// Upload Parts and Filter Fields
// =============================================================================

/// Multipart file part carrying the balance-history ledger
pub const PART_BALHIST: &str = "balhist";

/// Multipart file part carrying the account catalog
pub const PART_CUENTAS: &str = "cuentas";

/// Multipart file part carrying the entity roster
pub const PART_NOMINA: &str = "nomina";

/// Multipart file part carrying the price-index workbook
pub const PART_INDICES: &str = "indices";

/// Filter field names as submitted by the upload form
pub mod fields {
    pub const ENTIDAD: &str = "entidad";
    pub const BALHIST_DESDE: &str = "balhistDesde";
    pub const BALHIST_HASTA: &str = "balhistHasta";
    pub const INDICES_DESDE: &str = "indicesDesde";
    pub const INDICES_HASTA: &str = "indicesHasta";
}

// =============================================================================
// Source File Conventions
// =============================================================================

/// Field separator used by every flat-file export
pub const FIELD_SEPARATOR: char = '\t';

/// Quote character optionally wrapped around field values
pub const QUOTE_CHAR: char = '"';

/// Closure date written by the account export when an account is still open
pub const EMPTY_DATE_SENTINEL: &str = "/  /";

// =============================================================================
// Report Defaults
// =============================================================================

/// Label used when an account or entity key has no catalog entry
pub const DEFAULT_NOT_FOUND_LABEL: &str = "No encontrada";

/// Name of the single worksheet in the generated report
pub const DEFAULT_SHEET_NAME: &str = "Balance Pivoteado";

/// Prefix of the suggested report filename, followed by the entity id
pub const DEFAULT_FILENAME_PREFIX: &str = "Reporte_Pivoteado_Entidad_";

/// Extension of the generated report
pub const REPORT_EXTENSION: &str = "xlsx";

/// Fixed leading column headers of the report
pub const DEFAULT_HEADER_ENTITY: &str = "Entidad";
pub const DEFAULT_HEADER_ENTITY_NAME: &str = "Nombre Entidad";
pub const DEFAULT_HEADER_ACCOUNT: &str = "Cuenta";
pub const DEFAULT_HEADER_ACCOUNT_DESCRIPTION: &str = "Descripción Cuenta";

/// Columns available to month data: the xlsx limit of 16384 minus the four fixed columns
pub const MAX_MONTH_COLUMNS: u64 = 16_384 - 4;

/// Maximum worksheet name length accepted by spreadsheet applications
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// MIME type of the generated workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// =============================================================================
// Server Defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;

/// User-facing message for a request whose filters matched no balance rows
pub const MSG_NO_RECORDS: &str =
    "No se encontraron registros de balance con los filtros seleccionados.";

/// User-facing message for any internal failure
pub const MSG_INTERNAL_FAILURE: &str = "Falló el proceso de la aplicación.";

// =============================================================================
// Configuration Paths
// =============================================================================

/// Directory name under the user configuration directory
pub const CONFIG_DIR_NAME: &str = "balhist-report";

/// Configuration file name within [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";
