use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for urgency windows and application timestamps.
/// Injected as `Arc<dyn Clock>` so tests pin time to a fixed value.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Today at calendar-day granularity. Deadline comparisons use this,
    /// never the time of day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to one instant.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    pub fn at(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap().and_utc())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let clock = FixedClock::at(date);
        assert_eq!(clock.today(), date);
    }
}
