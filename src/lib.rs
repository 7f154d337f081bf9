//! Balance History Report Library
//!
//! A Rust library for turning the flat-file exports of a financial-entity
//! reporting pipeline into a month-by-account balance report.
//!
//! This library provides tools for:
//! - Parsing the latin-1 tab-separated ledger, account catalog and entity roster
//! - Parsing the price-index workbook (xlsx, xls or ods)
//! - Filtering balances by entity and month range
//! - Joining balances with account descriptions and entity names
//! - Pivoting balances into one row per account and one column per month
//! - Writing the pivoted report as an xlsx workbook
//! - Serving the whole pipeline behind a multipart upload endpoint

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod catalog_parser;
        pub mod filter;
        pub mod index_parser;
        pub mod join_resolver;
        pub mod ledger_parser;
        pub mod pivot_engine;
        pub mod report_builder;
        pub mod report_writer;
        pub mod text_source;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod http;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Period, PeriodRange, PivotedReport};
pub use app::services::filter::ReportFilters;
pub use app::services::report_builder::{
    RenderedReport, ReportOutcome, SourceFiles, build_report, render_report,
};
pub use config::Config;

/// Result type alias for the balance report pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for balance report operations
///
/// Malformed input lines never surface here: parsers skip them. These
/// variants cover rejected requests and internal failures only.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A filter value could not be interpreted
    #[error("Invalid filter '{field}' = '{value}': {reason}")]
    InvalidFilter {
        field: String,
        value: String,
        reason: String,
    },

    /// A required upload part was not supplied
    #[error("Missing upload part: {part}")]
    MissingUpload { part: String },

    /// The multipart body could not be read
    #[error("Malformed upload: {message}")]
    MalformedUpload { message: String },

    /// Workbook serialization failed
    #[error("Workbook writing error: {message}")]
    WorkbookWriting {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid filter error
    pub fn invalid_filter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFilter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing upload error
    pub fn missing_upload(part: impl Into<String>) -> Self {
        Self::MissingUpload { part: part.into() }
    }

    /// Create a malformed upload error
    pub fn malformed_upload(message: impl Into<String>) -> Self {
        Self::MalformedUpload {
            message: message.into(),
        }
    }

    /// Create a workbook writing error
    pub fn workbook_writing(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the pipeline
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilter { .. } | Self::MissingUpload { .. } | Self::MalformedUpload { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::WorkbookWriting {
            message: "Workbook serialization failed".to_string(),
            source: error,
        }
    }
}
