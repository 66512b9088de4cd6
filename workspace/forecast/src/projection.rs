use chrono::NaiveDate;
use polars::prelude::*;

use crate::engine::DailyBalance;
use crate::error::Result;

/// Renders the simulated daily balances as a DataFrame with `account_id`,
/// `date` and `balance` columns. Balances are carried as strings so the
/// decimal values survive the trip through the frame unchanged.
pub fn projection_dataframe(account_id: i32, daily_balances: &[DailyBalance]) -> Result<DataFrame> {
    let account_ids = vec![account_id; daily_balances.len()];
    let dates: Vec<NaiveDate> = daily_balances.iter().map(|d| d.date).collect();
    let balances: Vec<String> = daily_balances.iter().map(|d| d.balance.to_string()).collect();

    let df = DataFrame::new(vec![
        Series::new("account_id".into(), account_ids).into(),
        Series::new("date".into(), dates).into(),
        Series::new("balance".into(), balances).into(),
    ])?;

    Ok(df)
}
