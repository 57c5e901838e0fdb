//! Release schedule computation.
//!
//! A schedule maps a signup date and an [`IntervalPolicy`] to one release
//! instant per signal index. Arithmetic is done on UTC calendar dates, and
//! each release lands at midnight UTC of its date, so the result never
//! drifts across daylight-saving transitions.
//!
//! ```text
//! release_date(i) = signup_date + i * interval_days
//! release_at(i)   = release_date(i) 00:00:00 UTC
//! ```

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{MAJOR_SIGNAL_COUNT, MINOR_SIGNAL_COUNT};
use crate::error::ScheduleError;

/// Days between major signals in the reference policy.
pub const MAJOR_INTERVAL_DAYS: u32 = 21;

/// Interval and length of a release track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalPolicy {
    /// Days between consecutive releases.
    pub interval_days: u32,
    /// Number of signals on the track.
    pub count: u32,
}

impl IntervalPolicy {
    /// Nine narrative signals, one every 21 days.
    pub fn major() -> Self {
        Self {
            interval_days: MAJOR_INTERVAL_DAYS,
            count: MAJOR_SIGNAL_COUNT,
        }
    }

    /// One minor signal per day for 168 days.
    pub fn minor() -> Self {
        Self {
            interval_days: 1,
            count: MINOR_SIGNAL_COUNT,
        }
    }

    /// Total span in days from the first to the last release.
    pub fn span_days(&self) -> u64 {
        u64::from(self.interval_days) * u64::from(self.count.saturating_sub(1))
    }

    pub fn schedule(&self, signup: NaiveDate) -> Result<Schedule, ScheduleError> {
        compute_schedule(signup, self.interval_days, self.count)
    }
}

impl Default for IntervalPolicy {
    fn default() -> Self {
        Self::major()
    }
}

/// One release slot of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub index: u32,
    pub release_date: NaiveDate,
    pub release_at: DateTime<Utc>,
    pub days_from_signup: i64,
}

/// Ordered release timeline, strictly increasing in index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    signup: NaiveDate,
    policy: IntervalPolicy,
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn signup(&self) -> NaiveDate {
        self.signup
    }

    pub fn policy(&self) -> IntervalPolicy {
        self.policy
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&ScheduleEntry> {
        self.entries.get(index as usize)
    }

    /// Number of signals on this track.
    pub fn count(&self) -> u32 {
        self.policy.count
    }
}

/// Midnight UTC of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a stored signup value.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, in which case
/// the UTC date component is kept.
pub fn parse_signup_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| ScheduleError::invalid(format!("unparseable signup date '{raw}'")))
}

/// Compute the release timeline for `count` signals spaced `interval_days` apart.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidScheduleParameters`] if `interval_days`
/// or `count` is zero, or if the last release falls outside the supported
/// calendar range.
pub fn compute_schedule(
    signup: NaiveDate,
    interval_days: u32,
    count: u32,
) -> Result<Schedule, ScheduleError> {
    if interval_days == 0 {
        return Err(ScheduleError::invalid("interval_days must be at least 1"));
    }
    if count == 0 {
        return Err(ScheduleError::invalid("count must be at least 1"));
    }

    let last_offset = u64::from(count - 1) * u64::from(interval_days);
    if signup.checked_add_days(Days::new(last_offset)).is_none() {
        return Err(ScheduleError::invalid(format!(
            "last release overflows the calendar ({signup} + {last_offset} days)"
        )));
    }

    let mut entries = Vec::with_capacity(count as usize);
    for index in 0..count {
        let offset = u64::from(index) * u64::from(interval_days);
        let release_date = signup.checked_add_days(Days::new(offset)).ok_or_else(|| {
            ScheduleError::invalid(format!(
                "release of signal {index} overflows the calendar ({signup} + {offset} days)"
            ))
        })?;
        entries.push(ScheduleEntry {
            index,
            release_date,
            release_at: start_of_day(release_date),
            days_from_signup: offset as i64,
        });
    }

    tracing::debug!(%signup, interval_days, count, "computed release schedule");

    Ok(Schedule {
        signup,
        policy: IntervalPolicy {
            interval_days,
            count,
        },
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn major_schedule_spans_168_days() {
        let schedule = IntervalPolicy::major().schedule(date(2024, 1, 1)).unwrap();
        assert_eq!(schedule.len(), 9);
        assert_eq!(schedule.get(0).unwrap().release_date, date(2024, 1, 1));
        assert_eq!(schedule.get(1).unwrap().release_date, date(2024, 1, 22));
        assert_eq!(schedule.get(8).unwrap().release_date, date(2024, 6, 17));
        assert_eq!(schedule.get(8).unwrap().days_from_signup, 168);
        assert_eq!(IntervalPolicy::major().span_days(), 168);
    }

    #[test]
    fn releases_land_at_utc_midnight() {
        let schedule = compute_schedule(date(2024, 3, 30), 1, 3).unwrap();
        // Crosses the EU DST switch on 2024-03-31
        for entry in schedule.entries() {
            assert_eq!(entry.release_at, start_of_day(entry.release_date));
        }
        assert_eq!(
            schedule.get(2).unwrap().release_at - schedule.get(1).unwrap().release_at,
            chrono::Duration::days(1)
        );
    }

    #[test]
    fn minor_schedule_is_daily() {
        let schedule = IntervalPolicy::minor().schedule(date(2024, 1, 1)).unwrap();
        assert_eq!(schedule.len(), 168);
        assert_eq!(schedule.get(31).unwrap().release_date, date(2024, 2, 1));
    }

    #[test]
    fn rejects_zero_interval_and_count() {
        assert!(matches!(
            compute_schedule(date(2024, 1, 1), 0, 9),
            Err(ScheduleError::InvalidScheduleParameters { .. })
        ));
        assert!(matches!(
            compute_schedule(date(2024, 1, 1), 21, 0),
            Err(ScheduleError::InvalidScheduleParameters { .. })
        ));
    }

    #[test]
    fn rejects_calendar_overflow() {
        assert!(compute_schedule(NaiveDate::MAX, 1, 2).is_err());
    }

    #[test]
    fn huge_count_is_rejected_before_allocating() {
        assert!(matches!(
            compute_schedule(date(2024, 1, 1), 1, u32::MAX),
            Err(ScheduleError::InvalidScheduleParameters { .. })
        ));
        assert!(matches!(
            compute_schedule(date(2024, 1, 1), u32::MAX, 2),
            Err(ScheduleError::InvalidScheduleParameters { .. })
        ));
    }

    #[test]
    fn parse_signup_accepts_date_and_timestamp() {
        assert_eq!(parse_signup_date("2024-01-01").unwrap(), date(2024, 1, 1));
        assert_eq!(
            parse_signup_date("2024-01-01T23:30:00-02:00").unwrap(),
            date(2024, 1, 2)
        );
        assert_eq!(
            parse_signup_date("2024-05-10T00:00:00.000Z").unwrap(),
            date(2024, 5, 10)
        );
    }

    #[test]
    fn parse_signup_rejects_garbage() {
        assert!(matches!(
            parse_signup_date("yesterday"),
            Err(ScheduleError::InvalidScheduleParameters { .. })
        ));
        assert!(parse_signup_date("2024-02-30").is_err());
    }

    proptest! {
        #[test]
        fn releases_strictly_increase(
            day_offset in 0i64..20_000,
            interval in 1u32..60,
            count in 1u32..200,
        ) {
            let signup = date(1990, 1, 1) + chrono::Duration::days(day_offset);
            let schedule = compute_schedule(signup, interval, count).unwrap();
            prop_assert_eq!(schedule.len(), count as usize);
            for pair in schedule.entries().windows(2) {
                prop_assert!(pair[0].release_at < pair[1].release_at);
                prop_assert_eq!(pair[0].index + 1, pair[1].index);
            }
        }
    }
}
