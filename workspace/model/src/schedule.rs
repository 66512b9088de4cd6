use chrono::NaiveDate;

/// Occurrence-date resolution for a recurring cash-flow schedule.
///
/// Implementations answer lazy, point-in-time queries against the schedule's
/// recurrence rule without materializing the full occurrence series.
pub trait ScheduleRule {
    /// Returns the first occurrence strictly after `date`.
    ///
    /// A schedule repeats indefinitely, so a next occurrence always exists.
    fn occurrence_after(&self, date: NaiveDate) -> NaiveDate;

    /// Returns the last occurrence strictly before `date`, or `None` when
    /// no occurrence precedes it (the schedule anchor is the first one).
    fn occurrence_before(&self, date: NaiveDate) -> Option<NaiveDate>;
}
