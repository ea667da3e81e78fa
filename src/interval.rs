// src/interval.rs
//
// Occupancy window of a task. A task keeps its assignees busy from the first
// instant of its start day to the last instant of its due day, local time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::AppError;
use crate::models::Task;

const LAST_INSTANT: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => panic!("23:59:59.999 is a valid time of day"),
};

/// Closed interval `[start, end]` during which a task's assignees are busy.
///
/// Derived on demand from `dueDate` / `startDate`; never cached or stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TaskInterval {
    /// `start` is `start_date` (or `due_date` when absent) at 00:00:00.000,
    /// `end` is `due_date` at 23:59:59.999.
    ///
    /// No ordering check: a `start_date` after `due_date` produces an
    /// inverted interval (`start > end`) and overlap results against it are
    /// unspecified. Use [`TaskInterval::checked`] at input boundaries.
    pub fn from_dates(due_date: NaiveDate, start_date: Option<NaiveDate>) -> Self {
        let first_day = start_date.unwrap_or(due_date);
        Self {
            start: first_day.and_time(NaiveTime::MIN),
            end: due_date.and_time(LAST_INSTANT),
        }
    }

    pub fn for_task(task: &Task) -> Self {
        Self::from_dates(task.due_date, task.start_date)
    }

    /// Like [`TaskInterval::from_dates`] but rejects `start_date > due_date`.
    pub fn checked(due_date: NaiveDate, start_date: Option<NaiveDate>) -> Result<Self, AppError> {
        let interval = Self::from_dates(due_date, start_date);
        if interval.is_inverted() {
            return Err(AppError::InvalidInterval {
                start: interval.start.date(),
                due: due_date,
            });
        }
        Ok(interval)
    }

    /// Whole-day range `[from, to]`, as used by calendar queries.
    pub fn days(from: NaiveDate, to: NaiveDate) -> Self {
        Self::from_dates(to, Some(from))
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Closed-interval intersection: `s1 <= e2 && e1 >= s2`.
    pub fn overlaps(&self, other: &TaskInterval) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::tests::{day, maintenance, odl};
    use chrono::{Duration, Timelike};
    use pretty_assertions::assert_eq;

    #[test]
    fn maintenance_task_occupies_its_due_day() {
        let interval = TaskInterval::for_task(&maintenance("t", "2024-06-10", &["Mario"]));
        assert_eq!(interval.start.date(), day("2024-06-10"));
        assert_eq!(interval.end.date(), day("2024-06-10"));
        assert_eq!(interval.start.time(), NaiveTime::MIN);
        assert_eq!(
            (interval.end.hour(), interval.end.minute(), interval.end.second()),
            (23, 59, 59)
        );
        assert_eq!(interval.end.nanosecond(), 999_000_000);
    }

    #[test]
    fn odl_task_spans_every_day_inclusive() {
        let interval = TaskInterval::for_task(&odl("t", "2024-06-01", "2024-06-05", &["Luca"]));
        let mut current = day("2024-06-01");
        while current <= day("2024-06-05") {
            let probe = TaskInterval::from_dates(current, None);
            assert!(interval.overlaps(&probe), "day {} should be covered", current);
            current += Duration::days(1);
        }
        assert!(!interval.overlaps(&TaskInterval::from_dates(day("2024-05-31"), None)));
        assert!(!interval.overlaps(&TaskInterval::from_dates(day("2024-06-06"), None)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (("2024-06-01", "2024-06-05"), ("2024-06-05", "2024-06-09")),
            (("2024-06-01", "2024-06-05"), ("2024-06-06", "2024-06-09")),
            (("2024-06-01", "2024-06-30"), ("2024-06-10", "2024-06-10")),
            (("2024-06-03", "2024-06-03"), ("2024-06-03", "2024-06-03")),
        ];
        for ((s1, e1), (s2, e2)) in cases {
            let a = TaskInterval::from_dates(day(e1), Some(day(s1)));
            let b = TaskInterval::from_dates(day(e2), Some(day(s2)));
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn adjacent_days_do_not_overlap() {
        let due_on_n = TaskInterval::from_dates(day("2024-06-05"), None);
        let starts_next_day = TaskInterval::from_dates(day("2024-06-10"), Some(day("2024-06-06")));
        assert!(!due_on_n.overlaps(&starts_next_day));
        assert!(!starts_next_day.overlaps(&due_on_n));
    }

    #[test]
    fn same_day_always_overlaps() {
        let a = TaskInterval::from_dates(day("2024-06-10"), None);
        let b = TaskInterval::from_dates(day("2024-06-10"), Some(day("2024-06-10")));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn inverted_dates_are_kept_as_is() {
        let interval = TaskInterval::from_dates(day("2024-06-05"), Some(day("2024-06-08")));
        assert!(interval.is_inverted());
        assert_eq!(interval.start.date(), day("2024-06-08"));

        assert!(matches!(
            TaskInterval::checked(day("2024-06-05"), Some(day("2024-06-08"))),
            Err(AppError::InvalidInterval { .. })
        ));
        assert!(TaskInterval::checked(day("2024-06-05"), Some(day("2024-06-05"))).is_ok());
        assert_eq!(LAST_INSTANT, NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    }
}
