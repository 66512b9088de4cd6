use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;

use super::{helpers, setup_db, ForecastAssert, TestScenario, TestScenarioBuilder};
use model::entities::bank_account::AccountKind;
use model::entities::recurring_schedule::{RecurrencePeriod, ScheduleKind};

/// Pay-period mode pulls the window start back to the last paycheck. With
/// an observed payroll deposit the start snaps to its date (here one day
/// after the expected occurrence); without one the expected date stands.
pub struct ScenarioPayPeriodStart {
    observed_deposit: bool,
}

impl ScenarioPayPeriodStart {
    pub fn with_observed_deposit() -> Self {
        Self {
            observed_deposit: true,
        }
    }

    pub fn without_observed_deposit() -> Self {
        Self {
            observed_deposit: false,
        }
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioPayPeriodStart {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let account = helpers::new_account(&db, 500_00, AccountKind::Linked).await?;

        // Biweekly payroll: Feb 23, Mar 8, Mar 22, ...
        let payroll = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Income,
            "ACME PAYROLL",
            1200_00,
            RecurrencePeriod::Biweekly,
            NaiveDate::from_ymd_opt(2024, 2, 23).unwrap(),
            None,
        )
        .await?;
        let account = helpers::set_main_income_schedule(&db, &account, &payroll).await?;

        // Next paycheck relative to today.
        helpers::new_occurrence(
            &db,
            &payroll,
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            1200_00,
        )
        .await?;

        if self.observed_deposit {
            // The paycheck actually arrived a day late.
            helpers::new_transaction(
                &db,
                &account,
                NaiveDate::from_ymd_opt(2024, 2, 24).unwrap(),
                1200_00,
                "ACME PAYROLL",
                false,
            )
            .await?;
        }

        let streaming = helpers::new_schedule(
            &db,
            &account,
            ScheduleKind::Expense,
            "STREAMBOX",
            -100_00,
            RecurrencePeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            None,
        )
        .await?;
        helpers::new_occurrence(
            &db,
            &streaming,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            -100_00,
        )
        .await?;

        let start = if self.observed_deposit {
            NaiveDate::from_ymd_opt(2024, 2, 24).unwrap()
        } else {
            NaiveDate::from_ymd_opt(2024, 2, 23).unwrap()
        };

        let expected = ForecastAssert {
            today,
            start_from_pay_period: true,
            start,
            // One day before the March 8 paycheck.
            stop: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            start_balance: helpers::cents(500_00),
            lowest_balance: helpers::cents(400_00),
        };

        Ok((db, account, expected))
    }
}
