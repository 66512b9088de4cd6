use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A date range covered by a projection series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateRange {
    /// ISO date (YYYY-MM-DD)
    pub start: NaiveDate,
    /// ISO date (YYYY-MM-DD)
    pub end: NaiveDate,
}

/// One projected end-of-day balance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BalancePoint {
    pub account_id: i32,
    /// ISO date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub balance: Decimal,
}

impl BalancePoint {
    pub fn new(account_id: i32, date: NaiveDate, balance: Decimal) -> Self {
        Self {
            account_id,
            date,
            balance,
        }
    }
}

/// The day-by-day projected balance curve for an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BalanceProjectionSeries {
    pub points: Vec<BalancePoint>,
}

impl BalanceProjectionSeries {
    pub fn new(points: Vec<BalancePoint>) -> Self {
        Self { points }
    }

    /// The range covered by the series, when it is non-empty.
    pub fn date_range(&self) -> Option<DateRange> {
        let start = self.points.iter().map(|p| p.date).min()?;
        let end = self.points.iter().map(|p| p.date).max()?;
        Some(DateRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range() {
        let series = BalanceProjectionSeries::new(vec![
            BalancePoint::new(1, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), Decimal::ZERO),
            BalancePoint::new(1, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), Decimal::ZERO),
        ]);

        let range = series.date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_empty_series_has_no_range() {
        let series = BalanceProjectionSeries::new(vec![]);
        assert!(series.date_range().is_none());
    }
}
