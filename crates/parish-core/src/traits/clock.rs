//! Time source used for "today" comparisons and timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};

/// Source of the current time.
///
/// The booking engine never calls `Utc::now()` directly so that past-date
/// rules and `confirmed_at` stamps can be tested deterministically.
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the parish's local time from UTC.
    fn offset(&self) -> FixedOffset;

    /// Current calendar day in parish local time.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }
}

/// Wall-clock time with a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Create a clock for the given offset in whole hours. Out-of-range
    /// offsets fall back to UTC.
    pub fn with_offset_hours(hours: i32) -> Self {
        let offset = FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// A clock frozen at a given instant, advanced manually.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Freeze the clock at `now`, reporting UTC as local time.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            offset: Utc.fix(),
        }
    }

    /// Freeze the clock at noon UTC of the given day.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self::new(noon)
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|e| *e.into_inner())
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_respects_offset() {
        // 2024-06-02 03:00 UTC is still June 1st in Lima (UTC-5).
        let instant = NaiveDate::from_ymd_opt(2024, 6, 2)
            .and_then(|d| d.and_hms_opt(3, 0, 0))
            .expect("valid datetime")
            .and_utc();

        struct Lima(DateTime<Utc>);
        impl Clock for Lima {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
            fn offset(&self) -> FixedOffset {
                FixedOffset::west_opt(5 * 3600).expect("valid offset")
            }
        }

        assert_eq!(
            Lima(instant).today(),
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
        );
    }

    #[test]
    fn test_fixed_clock_advances() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let clock = FixedClock::at_date(day);
        assert_eq!(clock.today(), day);
        clock.advance(Duration::days(1));
        assert_eq!(clock.today(), day.succ_opt().expect("next day"));
    }

    #[test]
    fn test_system_clock_offset() {
        let clock = SystemClock::with_offset_hours(-5);
        assert_eq!(clock.offset().local_minus_utc(), -5 * 3600);
    }
}
