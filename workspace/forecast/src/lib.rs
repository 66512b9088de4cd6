pub mod engine;
pub mod error;
pub mod fetch;
pub mod ledger;
pub mod projection;

#[cfg(test)]
pub mod testing;

use chrono::{NaiveDate, Utc};
use engine::ForecastEngine;

/// Returns a default pre-configured forecast engine that will be used most
/// of the time.
///
/// This function uses the provided date as "today" or the current date if
/// none is provided. Handlers pass `None`; tests pin a date for
/// reproducible windows.
pub fn default_engine(today: Option<NaiveDate>) -> ForecastEngine {
    // Create the today date
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    ForecastEngine::new_with_today(today)
}
