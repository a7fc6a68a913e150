//! Duration tokens and business-day arithmetic.
//!
//! A duration is written `<integer><unit>` with unit `d`, `w`, `m` or `y`.
//! Weeks, months and years are fixed multiples of business days (7, 30 and
//! 365), matching how the form has always scheduled tasks.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::GanttError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    fn business_days(self) -> u64 {
        match self {
            Self::Days => 1,
            Self::Weeks => 7,
            Self::Months => 30,
            Self::Years => 365,
        }
    }

    fn suffix(self) -> char {
        match self {
            Self::Days => 'd',
            Self::Weeks => 'w',
            Self::Months => 'm',
            Self::Years => 'y',
        }
    }
}

/// A parsed duration token such as `3w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub amount: u32,
    pub unit: DurationUnit,
}

impl Duration {
    pub const ZERO: Self = Self {
        amount: 0,
        unit: DurationUnit::Days,
    };

    pub fn business_days(self) -> u64 {
        u64::from(self.amount) * self.unit.business_days()
    }
}

impl FromStr for Duration {
    type Err = GanttError;

    /// Whitespace anywhere in the token is ignored; an empty token is `0d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect();
        if compact.is_empty() {
            return Ok(Self::ZERO);
        }
        let invalid = || GanttError::InvalidDuration(s.to_string());

        let suffix = compact.chars().last().ok_or_else(invalid)?;
        let digits = &compact[..compact.len() - suffix.len_utf8()];
        let unit = match suffix {
            'd' => DurationUnit::Days,
            'w' => DurationUnit::Weeks,
            'm' => DurationUnit::Months,
            'y' => DurationUnit::Years,
            _ => return Err(invalid()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount = digits.parse().map_err(|_| invalid())?;
        Ok(Self { amount, unit })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Move forward to the next business day, or stay if already on one.
pub fn roll_forward(mut date: NaiveDate) -> Option<NaiveDate> {
    while !is_business_day(date) {
        date = date.checked_add_days(Days::new(1))?;
    }
    Some(date)
}

/// Roll `start` forward to a business day, then advance `days` business days.
///
/// Returns `None` only when the result falls outside the supported calendar.
pub fn add_business_days(start: NaiveDate, days: u64) -> Option<NaiveDate> {
    let mut date = roll_forward(start)?;

    // Whole weeks first so long spans don't walk day by day.
    let weeks = days / 5;
    let mut rest = days % 5;
    date = date.checked_add_days(Days::new(weeks.checked_mul(7)?))?;
    while rest > 0 {
        date = date.checked_add_days(Days::new(1))?;
        if is_business_day(date) {
            rest -= 1;
        }
    }
    Some(date)
}

pub fn end_date(start: NaiveDate, duration: Duration) -> Option<NaiveDate> {
    add_business_days(start, duration.business_days())
}
