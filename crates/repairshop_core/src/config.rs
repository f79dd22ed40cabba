//! Application paths and defaults.
//!
//! Every path derives from one base directory (the process working
//! directory for the console front end). Nothing is read from the
//! environment or command line.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DEFAULT_SHOP_NAME: &str = "Tech Spot";
pub const DB_FILE_NAME: &str = "repairs.db";
pub const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Banner shown above the menu.
    pub shop_name: String,
    /// SQLite store file.
    pub db_path: PathBuf,
    /// Directory receiving `<period>_report.pdf` and chart files.
    pub report_dir: PathBuf,
    /// Absolute directory for rotated log files.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Lays out all files under `base_dir`.
    pub fn in_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            db_path: base_dir.join(DB_FILE_NAME),
            report_dir: base_dir.to_path_buf(),
            log_dir: base_dir.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }

    /// Lays out all files under the current working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::in_dir(std::env::current_dir()?))
    }
}
