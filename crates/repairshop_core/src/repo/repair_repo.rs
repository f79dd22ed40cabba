//! Repair repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist repair rows and read them back in insertion order.
//! - Own the windowed aggregate queries behind summaries and charts.
//!
//! # Invariants
//! - Write paths only accept validated `RepairDraft` values.
//! - Dates are stored as `YYYY-MM-DD HH:MM:SS` text and windows compare
//!   against that text literally.
//! - Read paths reject rows whose stored date cannot be parsed.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::repair::{RepairDraft, RepairRecord, DATE_TIME_FORMAT};
use crate::model::summary::GroupTotal;
use chrono::{NaiveDateTime, Timelike};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REPAIRS_TABLE: &str = "repairs";
const REPAIRS_COLUMNS: [&str; 5] = ["id", "date", "description", "cost", "income"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for repair persistence and aggregate queries.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repair repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repair repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repair repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted repair data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the repair store.
pub trait RepairRepository {
    /// Inserts one repair stamped with `date` and returns the stored row.
    fn insert_repair(&self, date: NaiveDateTime, draft: &RepairDraft) -> RepoResult<RepairRecord>;
    /// Lists every repair ordered by ascending id.
    fn list_repairs(&self) -> RepoResult<Vec<RepairRecord>>;
    /// Sums cost/income per calendar day for rows dated on or after
    /// `window_start`, ordered by day ascending.
    fn totals_by_date(&self, window_start: &str) -> RepoResult<Vec<GroupTotal>>;
    /// Sums cost/income per description for rows dated on or after
    /// `window_start`, in first-insertion order.
    fn totals_by_description(&self, window_start: &str) -> RepoResult<Vec<GroupTotal>>;
}

/// SQLite-backed repair repository.
pub struct SqliteRepairRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRepairRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repair_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RepairRepository for SqliteRepairRepository<'_> {
    fn insert_repair(&self, date: NaiveDateTime, draft: &RepairDraft) -> RepoResult<RepairRecord> {
        let date = date.with_nanosecond(0).unwrap_or(date);
        self.conn.execute(
            "INSERT INTO repairs (date, description, cost, income)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                date.format(DATE_TIME_FORMAT).to_string(),
                draft.description.as_str(),
                draft.cost,
                draft.income,
            ],
        )?;

        Ok(RepairRecord {
            id: self.conn.last_insert_rowid(),
            date,
            description: draft.description.clone(),
            cost: draft.cost,
            income: draft.income,
        })
    }

    fn list_repairs(&self) -> RepoResult<Vec<RepairRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, description, cost, income
             FROM repairs
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut repairs = Vec::new();

        while let Some(row) = rows.next()? {
            repairs.push(parse_repair_row(row)?);
        }

        Ok(repairs)
    }

    fn totals_by_date(&self, window_start: &str) -> RepoResult<Vec<GroupTotal>> {
        query_totals(
            self.conn,
            "SELECT substr(date, 1, 10) AS label, SUM(cost), SUM(income)
             FROM repairs
             WHERE date >= ?1
             GROUP BY label
             ORDER BY label ASC;",
            window_start,
        )
    }

    fn totals_by_description(&self, window_start: &str) -> RepoResult<Vec<GroupTotal>> {
        query_totals(
            self.conn,
            "SELECT description AS label, SUM(cost), SUM(income)
             FROM repairs
             WHERE date >= ?1
             GROUP BY description
             ORDER BY MIN(id) ASC;",
            window_start,
        )
    }
}

fn query_totals(conn: &Connection, sql: &str, window_start: &str) -> RepoResult<Vec<GroupTotal>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([window_start])?;
    let mut totals = Vec::new();

    while let Some(row) = rows.next()? {
        totals.push(GroupTotal {
            label: row.get(0)?,
            cost: row.get(1)?,
            income: row.get(2)?,
        });
    }

    Ok(totals)
}

fn parse_repair_row(row: &Row<'_>) -> RepoResult<RepairRecord> {
    let id: i64 = row.get("id")?;
    let date_text: String = row.get("date")?;
    let date = NaiveDateTime::parse_from_str(&date_text, DATE_TIME_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in repairs.date (id {id})"
        ))
    })?;

    Ok(RepairRecord {
        id,
        date,
        description: row.get("description")?,
        cost: row.get("cost")?,
        income: row.get("income")?,
    })
}

fn ensure_repair_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, REPAIRS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(REPAIRS_TABLE));
    }

    for column in REPAIRS_COLUMNS {
        if !table_has_column(conn, REPAIRS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: REPAIRS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
