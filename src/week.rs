use crate::error::{PulseError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_from_monday as i64)
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() == 0
}

pub fn parse_week_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| PulseError::InvalidDate(format!("{input} (expected YYYY-MM-DD)")))
}

/// Half-open UTC interval [Monday 00:00, following Monday 00:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    pub fn for_week(week_date: NaiveDate) -> Result<Self> {
        if !is_week_start(week_date) {
            return Err(PulseError::InvalidDate(format!(
                "{week_date} is not a Monday (week start would be {})",
                week_start(week_date)
            )));
        }
        let start = Utc.from_utc_datetime(&week_date.and_time(NaiveTime::MIN));
        Ok(Self {
            start,
            end: start + Duration::weeks(1),
        })
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_normalizes_to_monday() {
        let wednesday = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(week_start(wednesday), monday);
        assert_eq!(week_start(monday), monday);
        let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_week_date("2026-01-12").is_ok());
        assert!(parse_week_date("last tuesday").is_err());
        assert!(parse_week_date("2026-13-01").is_err());
    }

    #[test]
    fn window_is_half_open() {
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let window = WeekWindow::for_week(monday).unwrap();
        assert!(window.contains(&window.start));
        assert!(!window.contains(&window.end));
        let inside = window.start + Duration::days(6) + Duration::hours(23);
        assert!(window.contains(&inside));
    }

    #[test]
    fn window_rejects_non_monday() {
        let friday = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
        assert!(matches!(
            WeekWindow::for_week(friday),
            Err(PulseError::InvalidDate(_))
        ));
    }
}
