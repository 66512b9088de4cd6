use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;

use super::{helpers, setup_db, ForecastAssert, TestScenario, TestScenarioBuilder};
use model::entities::bank_account::AccountKind;

/// A low balance with an uncleared card debit. For a linked account the
/// pending debit deepens the day-zero trough; for the in-house spending
/// account the debit has already settled into the balance, so the
/// projection leaves it out.
pub struct ScenarioPendingDebits {
    kind: AccountKind,
    expected_lowest_cents: i64,
}

impl ScenarioPendingDebits {
    pub fn new_linked() -> Self {
        Self {
            kind: AccountKind::Linked,
            expected_lowest_cents: -60_00,
        }
    }

    pub fn new_spending() -> Self {
        Self {
            kind: AccountKind::Spending,
            expected_lowest_cents: 40_00,
        }
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioPendingDebits {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let today = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();

        let account = helpers::new_account(&db, 40_00, self.kind).await?;
        helpers::new_transaction(&db, &account, today, -100_00, "GROCERY MART", true).await?;

        let expected = ForecastAssert {
            today,
            start_from_pay_period: false,
            start: today,
            stop: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            start_balance: helpers::cents(40_00),
            lowest_balance: helpers::cents(self.expected_lowest_cents),
        };

        Ok((db, account, expected))
    }
}
