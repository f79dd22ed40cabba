//! Wall-clock source for repair timestamps and summary windows.

use chrono::{Local, NaiveDateTime, Timelike};

/// Supplies "now" as local naive time with second precision.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always returns the same instant. Used for replaying a past day and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
