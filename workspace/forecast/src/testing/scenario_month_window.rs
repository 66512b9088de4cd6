use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;

use super::{helpers, setup_db, ForecastAssert, TestScenario, TestScenarioBuilder};
use model::entities::bank_account::AccountKind;
use model::entities::recurring_schedule::{RecurrencePeriod, ScheduleKind};

/// No paycheck schedule, so the window runs to month end. A projected
/// expense hits on day zero and a projected deposit lands five days later;
/// the trough is sampled before the deposit. A third occurrence has
/// already settled and must not count against the trough a second time.
pub struct ScenarioMonthWindow {}

impl ScenarioMonthWindow {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioMonthWindow {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let today = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();

        let account = helpers::new_account(&db, 300_00, AccountKind::Linked).await?;

        let rent = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Expense,
            "OAKWOOD RENT",
            -50_00,
            RecurrencePeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            None,
        )
        .await?;
        let side_gig = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Income,
            "RIDESHARE PAYOUT",
            500_00,
            RecurrencePeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(),
            None,
        )
        .await?;
        let utilities = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Expense,
            "CITY UTILITIES",
            -80_00,
            RecurrencePeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            None,
        )
        .await?;

        // 300 - 50 on day zero; the 500 deposit lands after the trough.
        helpers::new_occurrence(&db, &rent, today, -50_00).await?;
        helpers::new_occurrence(
            &db,
            &side_gig,
            NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(),
            500_00,
        )
        .await?;
        // Already settled: excluded from the projection entirely.
        helpers::new_realized_occurrence(
            &db,
            &utilities,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            -80_00,
            None,
            Some(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
        )
        .await?;

        let expected = ForecastAssert {
            today,
            start_from_pay_period: false,
            start: today,
            stop: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            start_balance: helpers::cents(300_00),
            lowest_balance: helpers::cents(250_00),
        };

        Ok((db, account, expected))
    }
}
