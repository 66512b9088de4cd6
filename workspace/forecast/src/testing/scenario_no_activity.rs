use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;

use super::{helpers, setup_db, ForecastAssert, TestScenario, TestScenarioBuilder};
use model::entities::bank_account::AccountKind;

/// An account with no recurring schedules and no pending transactions.
/// The projection is flat: the lowest balance is the current balance and
/// the window runs to the end of the calendar month.
pub struct ScenarioNoActivity {
    today: NaiveDate,
}

impl ScenarioNoActivity {
    pub fn new() -> Self {
        Self {
            today: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioNoActivity {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr> {
        let db = setup_db().await?;

        let account = helpers::new_account(&db, 300_00, AccountKind::Linked).await?;

        let expected = ForecastAssert {
            today: self.today,
            start_from_pay_period: false,
            start: self.today,
            stop: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            start_balance: helpers::cents(300_00),
            lowest_balance: helpers::cents(300_00),
        };

        Ok((db, account, expected))
    }
}
