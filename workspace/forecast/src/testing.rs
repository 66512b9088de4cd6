pub mod helpers;
pub mod scenario_month_window;
pub mod scenario_no_activity;
pub mod scenario_pay_period_start;
pub mod scenario_payday_window;
pub mod scenario_pending_debits;

use async_trait::async_trait;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use model::entities::bank_account;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

use crate::engine::ForecastEngine;
use crate::error::Result as ForecastResult;

pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    // Connect to the SQLite database. A single pooled connection: every
    // additional connection would get its own empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    // Try to apply migrations first
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

/// The figures a forecast scenario promises to produce.
#[derive(Debug, Clone)]
pub struct ForecastAssert {
    /// The date the engine is anchored at.
    pub today: NaiveDate,
    pub start_from_pay_period: bool,
    pub start: NaiveDate,
    pub stop: NaiveDate,
    pub start_balance: Decimal,
    pub lowest_balance: Decimal,
}

/// Prepared test scenario.
pub type TestScenario = (DatabaseConnection, bank_account::Model, ForecastAssert);

/// Trait for building test scenarios.
#[async_trait]
pub trait TestScenarioBuilder {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr>;
}

pub async fn run_and_assert_scenario(builder: &dyn TestScenarioBuilder) -> ForecastResult<()> {
    let (db, account, expected) = builder.get_scenario().await?;

    let engine = ForecastEngine::new_with_today(expected.today);
    let forecast = engine
        .forecast_account(&db, account.id, expected.start_from_pay_period)
        .await?
        .expect("scenario account should exist");

    assert_eq!(forecast.account_id, account.id);
    assert_eq!(forecast.start, expected.start, "window start mismatch");
    assert_eq!(forecast.stop, expected.stop, "window stop mismatch");
    assert_eq!(forecast.start_balance, expected.start_balance);
    assert_eq!(
        forecast.lowest_balance, expected.lowest_balance,
        "lowest balance mismatch"
    );
    assert!(forecast.stop >= forecast.start);

    Ok(())
}
