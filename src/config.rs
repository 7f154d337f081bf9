//! Configuration management and validation.
//!
//! Provides the report presentation settings and HTTP server settings,
//! loaded in layers: built-in defaults, an optional JSON file, then
//! command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FILENAME_PREFIX, DEFAULT_HEADER_ACCOUNT,
    DEFAULT_HEADER_ACCOUNT_DESCRIPTION, DEFAULT_HEADER_ENTITY, DEFAULT_HEADER_ENTITY_NAME,
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_MB, DEFAULT_NOT_FOUND_LABEL, DEFAULT_PORT,
    DEFAULT_SHEET_NAME, MAX_SHEET_NAME_LEN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub server: ServerConfig,
}

/// Report presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Text used when an account or entity has no catalog entry
    pub not_found_label: String,

    /// Name of the single worksheet
    pub sheet_name: String,

    /// Suggested filename prefix, followed by the entity id
    pub filename_prefix: String,

    /// Fixed column headers
    pub headers: ReportHeaders,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            not_found_label: DEFAULT_NOT_FOUND_LABEL.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            headers: ReportHeaders::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportHeaders {
    pub entity: String,
    pub entity_name: String,
    pub account: String,
    pub account_description: String,
}

impl Default for ReportHeaders {
    fn default() -> Self {
        Self {
            entity: DEFAULT_HEADER_ENTITY.to_string(),
            entity_name: DEFAULT_HEADER_ENTITY_NAME.to_string(),
            account: DEFAULT_HEADER_ACCOUNT.to_string(),
            account_description: DEFAULT_HEADER_ACCOUNT_DESCRIPTION.to_string(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Upper bound for a whole multipart request, in megabytes
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::configuration(format!("Invalid bind address '{}:{}': {}", self.host, self.port, e)))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Config {
    /// Default configuration file location, `<config_dir>/balhist-report/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults, overlaid by the explicit file or, failing that, the default file when it exists
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let report = &self.report;

        if report.sheet_name.trim().is_empty() {
            return Err(Error::configuration("sheet_name must not be empty"));
        }
        if report.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::configuration(format!(
                "sheet_name must be at most {} characters",
                MAX_SHEET_NAME_LEN
            )));
        }
        if report.not_found_label.is_empty() {
            return Err(Error::configuration("not_found_label must not be empty"));
        }
        if report.filename_prefix.contains(['/', '\\', '"']) {
            return Err(Error::configuration(
                "filename_prefix must not contain path separators or quotes",
            ));
        }

        let headers = &report.headers;
        if [
            &headers.entity,
            &headers.entity_name,
            &headers.account,
            &headers.account_description,
        ]
        .iter()
        .any(|h| h.trim().is_empty())
        {
            return Err(Error::configuration("report headers must not be empty"));
        }

        if self.server.port == 0 {
            return Err(Error::configuration("server port must be greater than 0"));
        }
        if self.server.max_upload_mb == 0 {
            return Err(Error::configuration("max_upload_mb must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.not_found_label, "No encontrada");
        assert_eq!(config.report.sheet_name, "Balance Pivoteado");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validate_rejects_long_sheet_name() {
        let mut config = Config::default();
        config.report.sheet_name = "x".repeat(32);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port_and_limit() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.max_upload_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsafe_filename_prefix() {
        let mut config = Config::default();
        config.report.filename_prefix = "../report_".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"server": {"port": 8080}, "report": {"not_found_label": "N/A"}}"#)
            .unwrap();

        let config = Config::load_layered(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.report.not_found_label, "N/A");
        assert_eq!(config.report.headers.account, "Cuenta");
    }

    #[test]
    fn test_from_file_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.max_upload_bytes(), 64 * 1024 * 1024);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
