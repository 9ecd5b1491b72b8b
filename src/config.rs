//! Configuration file handling for database connections.
//!
//! This module provides loading and parsing of `.sql_template.json`
//! configuration files. Supports SQLite, in-memory and PostgreSQL databases
//! via a structured JSON format.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::db::{DatabaseConfig, PostgresConfig};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".sql_template.json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported database URL '{url}': unknown scheme '{scheme}'")]
    UnsupportedUrl { url: String, scheme: String },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,
}

/// Database configuration variants.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite database file
    Sqlite {
        path: PathBuf,
        #[serde(default)]
        busy_timeout_ms: Option<u64>,
    },
    /// In-memory database, mostly useful for trying things out
    #[serde(rename = "memory")]
    Mem,
    /// PostgreSQL server
    #[serde(rename = "postgres")]
    Postgres(PostgresConfig),
}

impl ConfigFile {
    /// Load configuration from `.sql_template.json` in the current directory.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file is not an error and yields `None`; an unreadable or
    /// malformed one is.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Some(config))
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn into_database_config(self) -> DatabaseConfig {
        match self {
            Self::Sqlite {
                path,
                busy_timeout_ms,
            } => DatabaseConfig::Sqlite {
                path,
                busy_timeout_ms,
            },
            Self::Mem => DatabaseConfig::Memory,
            Self::Postgres(pg_config) => DatabaseConfig::Postgres(pg_config),
        }
    }
}
