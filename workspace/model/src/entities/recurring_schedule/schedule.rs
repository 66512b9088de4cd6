use chrono::{Datelike, Duration, NaiveDate};

use crate::dates::days_in_month;
use crate::entities::recurring_schedule::{Model as RecurringSchedule, RecurrencePeriod};
use crate::schedule::ScheduleRule;

impl RecurringSchedule {
    /// Days of the month this schedule can fire on. Only meaningful for
    /// the month-based periods.
    fn month_days(&self) -> Vec<u32> {
        match self.period {
            RecurrencePeriod::SemiMonthly => {
                let mut days = vec![
                    self.anchor_date.day(),
                    self.second_day.unwrap_or(15).max(1) as u32,
                ];
                days.sort_unstable();
                days.dedup();
                days
            }
            _ => vec![self.anchor_date.day()],
        }
    }

    /// Occurrence dates within one calendar month. Days past the end of a
    /// short month clamp to its last day.
    fn candidates_in_month(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        self.month_days()
            .into_iter()
            .map(|d| {
                let day = d.min(days_in_month(year, month));
                NaiveDate::from_ymd_opt(year, month, day).unwrap()
            })
            .collect()
    }

    fn week_step_days(&self) -> i64 {
        match self.period {
            RecurrencePeriod::Weekly => 7,
            RecurrencePeriod::Biweekly => 14,
            RecurrencePeriod::SemiMonthly | RecurrencePeriod::Monthly => {
                unreachable!("month-based periods do not step by weeks")
            }
        }
    }
}

impl ScheduleRule for RecurringSchedule {
    fn occurrence_after(&self, date: NaiveDate) -> NaiveDate {
        // The anchor is the first occurrence.
        if date < self.anchor_date {
            return self.anchor_date;
        }

        match self.period {
            RecurrencePeriod::Weekly | RecurrencePeriod::Biweekly => {
                let step = self.week_step_days();
                let elapsed = (date - self.anchor_date).num_days();
                self.anchor_date + Duration::days((elapsed / step + 1) * step)
            }
            RecurrencePeriod::SemiMonthly | RecurrencePeriod::Monthly => {
                let mut year = date.year();
                let mut month = date.month();
                loop {
                    let next = self
                        .candidates_in_month(year, month)
                        .into_iter()
                        .filter(|c| *c > date && *c >= self.anchor_date)
                        .min();
                    if let Some(next) = next {
                        return next;
                    }
                    month += 1;
                    if month > 12 {
                        month = 1;
                        year += 1;
                    }
                }
            }
        }
    }

    fn occurrence_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        // Nothing precedes the anchor.
        if date <= self.anchor_date {
            return None;
        }

        match self.period {
            RecurrencePeriod::Weekly | RecurrencePeriod::Biweekly => {
                let step = self.week_step_days();
                let elapsed = (date - self.anchor_date).num_days();
                Some(self.anchor_date + Duration::days((elapsed - 1) / step * step))
            }
            RecurrencePeriod::SemiMonthly | RecurrencePeriod::Monthly => {
                let mut year = date.year();
                let mut month = date.month();
                loop {
                    let prev = self
                        .candidates_in_month(year, month)
                        .into_iter()
                        .filter(|c| *c < date && *c >= self.anchor_date)
                        .max();
                    if let Some(prev) = prev {
                        return Some(prev);
                    }
                    if year < self.anchor_date.year()
                        || (year == self.anchor_date.year() && month <= self.anchor_date.month())
                    {
                        return None;
                    }
                    if month == 1 {
                        month = 12;
                        year -= 1;
                    } else {
                        month -= 1;
                    }
                }
            }
        }
    }
}
