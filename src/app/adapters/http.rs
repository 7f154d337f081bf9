//! HTTP front end for the report pipeline
//!
//! Serves the embedded upload form and a multipart `POST /upload` endpoint.
//! Uploaded files are held in memory for the duration of the request only.

use crate::app::services::filter::ReportFilters;
use crate::app::services::report_builder::{RenderedReport, SourceFiles, render_report};
use crate::config::{Config, ReportConfig};
use crate::constants::{
    MSG_INTERNAL_FAILURE, MSG_NO_RECORDS, PART_BALHIST, PART_CUENTAS, PART_INDICES, PART_NOMINA,
    XLSX_CONTENT_TYPE, fields,
};
use crate::{Error, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task;
use tracing::{debug, error, info, warn};

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const SCRIPTS_JS: &str = include_str!("../../../static/scripts.js");

const FILE_PARTS: [&str; 4] = [PART_BALHIST, PART_CUENTAS, PART_NOMINA, PART_INDICES];

/// Shared, read-only request state
#[derive(Debug)]
pub struct AppState {
    pub report: ReportConfig,
}

/// Build the application router
pub fn router(config: &Config) -> Router {
    let state = Arc::new(AppState {
        report: config.report.clone(),
    });

    Router::new()
        .route("/", get(index_page))
        .route("/scripts.js", get(scripts))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes()))
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::io(format!("Failed to bind {}", addr), e))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::io("Server terminated unexpectedly", e))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received CTRL+C, shutting down gracefully"),
        Err(e) => error!("Failed to install CTRL+C signal handler: {}", e),
    }
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn scripts() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPTS_JS,
    )
}

async fn upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match handle_upload(state, multipart).await {
        Ok(response) => response,
        Err(e) => error_response(e),
    }
}

async fn handle_upload(state: Arc<AppState>, multipart: Multipart) -> Result<Response> {
    let form = UploadForm::from_multipart(multipart).await?;
    info!("Filters received: {:?}", form.fields);

    let filters = form.filters()?;
    let sources = form.into_sources()?;

    let rendered = task::spawn_blocking(move || render_report(&sources, &filters, &state.report))
        .await
        .map_err(|e| Error::processing_interrupted(format!("report task failed: {}", e)))??;

    Ok(match rendered {
        RenderedReport::Workbook {
            filename,
            bytes,
            rows,
            months,
        } => {
            info!("Sending {} ({} rows x {} months)", filename, rows, months);
            workbook_response(&filename, bytes)
        }
        RenderedReport::NoMatchingRecords(reason) => {
            debug!("No report produced: {:?}", reason);
            (StatusCode::NOT_FOUND, MSG_NO_RECORDS).into_response()
        }
    })
}

/// 200 response carrying the workbook as an attachment
pub fn workbook_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Plain-text error response; internal details stay in the log
pub fn error_response(error: Error) -> Response {
    if error.is_client_error() {
        warn!("Rejected upload: {}", error);
        (StatusCode::BAD_REQUEST, error.to_string()).into_response()
    } else {
        error!("Critical failure while processing upload: {}", error);
        (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_FAILURE).into_response()
    }
}

/// Collected multipart parts of one upload
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, Vec<u8>>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart body; parts named after a source file are kept as bytes
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::malformed_upload(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if FILE_PARTS.contains(&name.as_str()) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::malformed_upload(format!("part '{}': {}", name, e)))?;
                debug!("Received part '{}' ({} bytes)", name, bytes.len());
                form.insert_file(name, bytes.to_vec());
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::malformed_upload(format!("field '{}': {}", name, e)))?;
                form.insert_field(name, text);
            }
        }

        Ok(form)
    }

    pub fn insert_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn required_field(&self, name: &str) -> Result<&str> {
        self.field(name)
            .ok_or_else(|| Error::invalid_filter(name, "", "field is required"))
    }

    /// Interpret the five filter fields
    pub fn filters(&self) -> Result<ReportFilters> {
        ReportFilters::from_raw(
            self.required_field(fields::ENTIDAD)?,
            self.required_field(fields::BALHIST_DESDE)?,
            self.required_field(fields::BALHIST_HASTA)?,
            self.field(fields::INDICES_DESDE),
            self.field(fields::INDICES_HASTA),
        )
    }

    /// Take ownership of the uploaded sources
    ///
    /// The ledger, account catalog and entity roster are required; the
    /// price-index workbook is optional.
    pub fn into_sources(mut self) -> Result<SourceFiles> {
        let mut take = |part: &str| {
            self.files
                .remove(part)
                .ok_or_else(|| Error::missing_upload(part))
        };

        let balhist = take(PART_BALHIST)?;
        let cuentas = take(PART_CUENTAS)?;
        let nomina = take(PART_NOMINA)?;
        let indices = self.files.remove(PART_INDICES);

        Ok(SourceFiles {
            balhist,
            cuentas,
            nomina,
            indices,
        })
    }
}
