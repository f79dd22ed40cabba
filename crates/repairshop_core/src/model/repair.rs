//! Repair record model and input validation.
//!
//! # Responsibility
//! - Define the canonical persisted repair row.
//! - Turn raw operator input into a validated draft before persistence.
//!
//! # Invariants
//! - `description` is non-empty after trimming.
//! - `cost` and `income` are finite and non-negative.
//! - Timestamps are never taken from operator input.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage format of `repairs.date`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Calendar-day prefix of [`DATE_TIME_FORMAT`] used for grouping and windows.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Auto-assigned row id of a repair.
pub type RepairId = i64;

/// One recorded repair job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRecord {
    pub id: RepairId,
    /// Local creation time, second precision.
    pub date: NaiveDateTime,
    pub description: String,
    pub cost: f64,
    pub income: f64,
}

impl RepairRecord {
    /// Income minus cost for this single job.
    pub fn net_profit(&self) -> f64 {
        self.income - self.cost
    }
}

/// Operator input that passed validation but has not been timestamped yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairDraft {
    pub description: String,
    pub cost: f64,
    pub income: f64,
}

impl RepairDraft {
    /// Validates raw form input.
    ///
    /// # Errors
    /// - [`InputError::MissingField`] when any field is blank.
    /// - [`InputError::NotNumeric`] when an amount does not parse as a finite
    ///   number.
    /// - [`InputError::NegativeAmount`] when an amount is below zero.
    pub fn parse(description: &str, cost: &str, income: &str) -> Result<Self, InputError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InputError::MissingField(InputField::Description));
        }

        Ok(Self {
            description: description.to_string(),
            cost: parse_amount(InputField::Cost, cost)?,
            income: parse_amount(InputField::Income, income)?,
        })
    }
}

/// Form field named by an [`InputError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Description,
    Cost,
    Income,
}

impl Display for InputField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Description => "description",
            Self::Cost => "cost",
            Self::Income => "income",
        })
    }
}

/// Rejected operator input. Never changes store state.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    MissingField(InputField),
    NotNumeric { field: InputField, value: String },
    NegativeAmount { field: InputField, value: f64 },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(
                f,
                "{field} is required; please enter description, cost, and income"
            ),
            Self::NotNumeric { field, value } => {
                write!(f, "{field} must be a number, got `{value}`")
            }
            Self::NegativeAmount { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
        }
    }
}

impl Error for InputError {}

fn parse_amount(field: InputField, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingField(field));
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::NotNumeric {
            field,
            value: trimmed.to_string(),
        })?;

    if value < 0.0 {
        return Err(InputError::NegativeAmount { field, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{InputError, InputField, RepairDraft};

    #[test]
    fn parse_trims_and_accepts_decimal_amounts() {
        let draft = RepairDraft::parse("  screen repair ", " 50 ", "99.5").unwrap();
        assert_eq!(draft.description, "screen repair");
        assert_eq!(draft.cost, 50.0);
        assert_eq!(draft.income, 99.5);
    }

    #[test]
    fn parse_rejects_blank_fields_in_form_order() {
        assert_eq!(
            RepairDraft::parse("   ", "1", "2").unwrap_err(),
            InputError::MissingField(InputField::Description)
        );
        assert_eq!(
            RepairDraft::parse("battery", "", "2").unwrap_err(),
            InputError::MissingField(InputField::Cost)
        );
        assert_eq!(
            RepairDraft::parse("battery", "1", " ").unwrap_err(),
            InputError::MissingField(InputField::Income)
        );
    }

    #[test]
    fn parse_rejects_non_numeric_and_non_finite_amounts() {
        assert!(matches!(
            RepairDraft::parse("battery", "ten", "2").unwrap_err(),
            InputError::NotNumeric { field: InputField::Cost, ref value } if value == "ten"
        ));
        assert!(matches!(
            RepairDraft::parse("battery", "1", "NaN").unwrap_err(),
            InputError::NotNumeric {
                field: InputField::Income,
                ..
            }
        ));
        assert!(matches!(
            RepairDraft::parse("battery", "inf", "2").unwrap_err(),
            InputError::NotNumeric {
                field: InputField::Cost,
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_negative_amounts() {
        let err = RepairDraft::parse("battery", "1", "-4").unwrap_err();
        assert_eq!(
            err,
            InputError::NegativeAmount {
                field: InputField::Income,
                value: -4.0
            }
        );
        assert!(err.to_string().contains("income"));
    }
}
