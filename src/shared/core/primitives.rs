// Time and money primitives shared by every module.
//
// Conventions
// - Instants are UTC epoch seconds (i64). Calendar values (week starts, pay periods,
//   effective dates) are NaiveDate interpreted in UTC.
// - Money is a Decimal rounded to cents, hours are a Decimal rounded to 4 places and
//   always derived from an integer number of seconds.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::shared::core::errors::DomainError;

pub const SECONDS_PER_HOUR: i64 = 3_600;

pub fn now_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Epoch seconds of 00:00:00 UTC on `date`.
pub fn day_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

pub fn date_of(epoch_seconds: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0).map(|dt| dt.date_naive())
}

/// Accepts a client supplied instant only when it falls on a representable calendar day.
pub fn valid_instant(field: &str, epoch_seconds: i64) -> Result<i64, DomainError> {
    date_of(epoch_seconds)
        .map(|_| epoch_seconds)
        .ok_or_else(|| DomainError::Validation(format!("{field} {epoch_seconds} is out of range")))
}

/// Seconds from `start` to `end`; must be strictly positive.
pub fn elapsed_seconds(start: i64, end: i64) -> Result<i64, DomainError> {
    match end.checked_sub(start) {
        Some(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(DomainError::Validation(
            "end_time must be after start_time".into(),
        )),
    }
}

/// `(iso_year, iso_week)` of the UTC calendar day containing `epoch_seconds`.
pub fn iso_week_key(epoch_seconds: i64) -> Option<(i32, u32)> {
    date_of(epoch_seconds).map(|date| {
        let week = date.iso_week();
        (week.year(), week.week())
    })
}

pub fn seconds_to_hours(seconds: i64) -> Decimal {
    (Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)).round_dp(4)
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    round_money(amount * rate / dec!(100))
}

/// Half-open calendar range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::Validation(format!(
                "period end {end} must be after period start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn week_starting(start: NaiveDate) -> Result<Self, DomainError> {
        let end = start
            .checked_add_days(Days::new(7))
            .ok_or_else(|| DomainError::Validation(format!("week start {start} is out of range")))?;
        Self::new(start, end)
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn start_epoch(&self) -> i64 {
        day_start(self.start)
    }

    pub fn end_epoch(&self) -> i64 {
        day_start(self.end)
    }

    pub fn contains_instant(&self, epoch_seconds: i64) -> bool {
        epoch_seconds >= self.start_epoch() && epoch_seconds < self.end_epoch()
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}
