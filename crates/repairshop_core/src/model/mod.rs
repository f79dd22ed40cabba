//! Domain model for the repair ledger.
//!
//! # Responsibility
//! - Define the persisted repair record and its input validation rules.
//! - Define summary periods and aggregated group totals used by reporting.
//!
//! # Invariants
//! - A `RepairDraft` only exists for validated input.
//! - Repair timestamps have second precision.

pub mod period;
pub mod repair;
pub mod summary;
