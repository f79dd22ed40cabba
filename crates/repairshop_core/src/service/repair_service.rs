//! Repair store use-case service.
//!
//! # Responsibility
//! - Validate operator input and timestamp new repairs.
//! - Resolve summary periods into repository window queries.
//! - Collapse long description breakdowns for charting.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - Repair dates always come from the injected clock.
//! - Empty windows yield empty sequences, not errors.

use crate::model::period::Period;
use crate::model::repair::{InputError, RepairDraft, RepairRecord};
use crate::model::summary::{collapse_overflow, GroupTotal};
use crate::repo::repair_repo::{RepairRepository, RepoError};
use crate::service::clock::{Clock, SystemClock};
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from repair store operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Operator input was rejected; store unchanged.
    InvalidInput(InputError),
    /// Persistence-layer failure.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<InputError> for ServiceError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Repair store facade over a repository and a clock.
pub struct RepairService<R: RepairRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: RepairRepository> RepairService<R> {
    /// Creates a service that timestamps with the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: RepairRepository, C: Clock> RepairService<R, C> {
    /// Creates a service with an explicit clock.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Validates raw form input, stamps it with the current time and persists
    /// it.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank description or a blank, non-numeric or
    ///   negative amount.
    /// - `Storage` when the insert fails.
    pub fn add_repair(
        &self,
        description: &str,
        cost: &str,
        income: &str,
    ) -> ServiceResult<RepairRecord> {
        let draft = match RepairDraft::parse(description, cost, income) {
            Ok(draft) => draft,
            Err(err) => {
                warn!("event=repair_add module=service status=rejected reason=\"{err}\"");
                return Err(err.into());
            }
        };

        match self.repo.insert_repair(self.clock.now(), &draft) {
            Ok(record) => {
                info!(
                    "event=repair_add module=service status=ok id={} date=\"{}\"",
                    record.id, record.date
                );
                Ok(record)
            }
            Err(err) => {
                error!("event=repair_add module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Returns every repair in insertion order.
    pub fn list_repairs(&self) -> ServiceResult<Vec<RepairRecord>> {
        Ok(self.repo.list_repairs()?)
    }

    /// Per-day totals for the period's window ending now.
    pub fn summarize(&self, period: Period) -> ServiceResult<Vec<GroupTotal>> {
        self.summarize_as_of(period, self.clock.now())
    }

    /// Per-day totals for the period's window ending at `as_of`.
    pub fn summarize_as_of(
        &self,
        period: Period,
        as_of: NaiveDateTime,
    ) -> ServiceResult<Vec<GroupTotal>> {
        let window_start = period.window_start(as_of);
        let groups = self.repo.totals_by_date(&window_start)?;
        info!(
            "event=summary module=service status=ok period={} window_start={} groups={}",
            period,
            window_start,
            groups.len()
        );
        Ok(groups)
    }

    /// Per-description totals for the period's window ending now.
    pub fn summarize_by_description(&self, period: Period) -> ServiceResult<Vec<GroupTotal>> {
        self.summarize_by_description_as_of(period, self.clock.now())
    }

    /// Per-description totals for the period's window ending at `as_of`.
    ///
    /// More than eight descriptions are reduced to seven plus `"Other"`.
    pub fn summarize_by_description_as_of(
        &self,
        period: Period,
        as_of: NaiveDateTime,
    ) -> ServiceResult<Vec<GroupTotal>> {
        let window_start = period.window_start(as_of);
        let groups = self.repo.totals_by_description(&window_start)?;
        let distinct = groups.len();
        let groups = collapse_overflow(groups);
        info!(
            "event=summary_by_description module=service status=ok period={} window_start={} distinct={} groups={}",
            period,
            window_start,
            distinct,
            groups.len()
        );
        Ok(groups)
    }

    /// End-of-day shortcut for the daily summary.
    pub fn day_end(&self) -> ServiceResult<Vec<GroupTotal>> {
        self.summarize(Period::Daily)
    }
}
