// ABOUTME: Source of the current time for timestamps, date defaults and daily progress
// ABOUTME: System clock in production, fixed clock for deterministic tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Provides the current instant and calendar date
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Today's date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock, dates in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to noon UTC of one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
            .and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_now_falls_on_its_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let clock = FixedClock(date);

        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }
}
