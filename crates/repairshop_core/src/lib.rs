//! Core logic for the Tech Spot repair ledger.
//! Owns the repair store, summary windows and report rendering.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::period::{Period, UnknownPeriod};
pub use model::repair::{InputError, InputField, RepairDraft, RepairId, RepairRecord};
pub use model::summary::{GroupTotal, Totals, OTHER_GROUP_LABEL};
pub use repo::repair_repo::{RepairRepository, RepoError, RepoResult, SqliteRepairRepository};
pub use report::chart::{render_chart, render_period_chart, BarChart, ChartPair};
pub use report::currency::format_currency;
pub use report::pdf::render_report;
pub use report::text::render_summary_text;
pub use report::{ReportError, ReportResult};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::repair_service::{RepairService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
