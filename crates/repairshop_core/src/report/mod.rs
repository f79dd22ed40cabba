//! Reporting projections over summary groups.
//!
//! # Responsibility
//! - Render grouped totals as summary text, bar charts and PDF reports.
//! - Own currency formatting shared by every output.
//! - Write report artifacts to disk, replacing earlier files.
//!
//! # Invariants
//! - Rendering never touches the store; inputs are precomputed groups.
//! - Grand totals are always the sum of the rendered groups.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod chart;
pub mod currency;
pub mod pdf;
pub mod text;

pub type ReportResult<T> = Result<T, ReportError>;

/// Report artifact could not be written. Store state is unaffected.
#[derive(Debug)]
pub enum ReportError {
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Writes `bytes` to `path`, truncating any existing file.
pub(crate) fn write_artifact(path: &Path, bytes: &[u8]) -> ReportResult<()> {
    match std::fs::write(path, bytes) {
        Ok(()) => {
            info!(
                "event=artifact_write module=report status=ok path={} bytes={}",
                path.display(),
                bytes.len()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=artifact_write module=report status=error path={} error={}",
                path.display(),
                source
            );
            Err(ReportError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
