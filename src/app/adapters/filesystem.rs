//! Local filesystem access for the command-line report
//!
//! Reads the source exports into memory and writes the finished workbook.
//! The pipeline itself never touches the filesystem.

use crate::app::services::report_builder::SourceFiles;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Paths of the four source exports
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub balhist: PathBuf,
    pub cuentas: PathBuf,
    pub nomina: PathBuf,
    pub indices: Option<PathBuf>,
}

impl SourcePaths {
    /// Read every source into memory
    pub async fn read(&self) -> Result<SourceFiles> {
        let indices = match &self.indices {
            Some(path) => Some(read_source(path).await?),
            None => None,
        };

        Ok(SourceFiles {
            balhist: read_source(&self.balhist).await?,
            cuentas: read_source(&self.cuentas).await?,
            nomina: read_source(&self.nomina).await?,
            indices,
        })
    }
}

async fn read_source(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Write the workbook into `output_dir`, creating it when needed
pub async fn write_report(output_dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Error::io(format!("Failed to create {}", output_dir.display()), e))?;

    let path = output_dir.join(filename);
    fs::write(&path, bytes)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
    Ok(path)
}
