//! Runtime configuration resolved from `MEDIHEALTH_*` environment variables.

use std::path::PathBuf;

pub const DATASET_PATH_ENV: &str = "MEDIHEALTH_DATASET_PATH";
pub const LOG_MODE_ENV: &str = "MEDIHEALTH_LOG_MODE";
pub const LOG_FILE_ENV: &str = "MEDIHEALTH_LOG_FILE";
pub const DIAGNOSTICS_ENV: &str = "MEDIHEALTH_DIAGNOSTICS";

const DEFAULT_DATASET_PATH: &str = "data/heart.csv";
const DEFAULT_LOG_FILE: &str = "medihealth.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise.
    Auto,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bundled training CSV
    pub dataset_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Trace every encoded feature vector and raw label at `info`
    pub diagnostics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            diagnostics: false,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            dataset_path: lookup(DATASET_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            diagnostics: lookup(DIAGNOSTICS_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.diagnostics),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}
