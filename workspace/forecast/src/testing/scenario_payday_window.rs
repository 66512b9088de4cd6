use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;

use super::{helpers, setup_db, ForecastAssert, TestScenario, TestScenarioBuilder};
use model::entities::bank_account::AccountKind;
use model::entities::recurring_schedule::{RecurrencePeriod, ScheduleKind};

/// A biweekly paycheck lands ten days out. The window must stop exactly
/// one day before it, and the projected bill inside the window sets the
/// trough.
pub struct ScenarioPaydayWindow {}

impl ScenarioPaydayWindow {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioPaydayWindow {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let today = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();

        let account = helpers::new_account(&db, 500_00, AccountKind::Linked).await?;

        let payroll = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Income,
            "ACME PAYROLL",
            1200_00,
            RecurrencePeriod::Biweekly,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            None,
        )
        .await?;
        let account = helpers::set_main_income_schedule(&db, &account, &payroll).await?;

        // Next paycheck: March 18, ten days out.
        helpers::new_occurrence(
            &db,
            &payroll,
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            1200_00,
        )
        .await?;

        let insurance = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Expense,
            "LAKESIDE INSURANCE",
            -200_00,
            RecurrencePeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            None,
        )
        .await?;
        helpers::new_occurrence(
            &db,
            &insurance,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            -200_00,
        )
        .await?;

        let expected = ForecastAssert {
            today,
            start_from_pay_period: false,
            start: today,
            // One day before the March 18 paycheck.
            stop: NaiveDate::from_ymd_opt(2024, 3, 17).unwrap(),
            start_balance: helpers::cents(500_00),
            lowest_balance: helpers::cents(300_00),
        };

        Ok((db, account, expected))
    }
}
