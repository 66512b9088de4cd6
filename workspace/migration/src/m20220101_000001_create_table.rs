use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create bank_accounts table
        //
        // `main_income_schedule_id` is a soft reference into
        // recurring_schedules: the two tables reference each other, so the
        // column carries no foreign key and is reconciled at the
        // application layer.
        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(pk_auto(BankAccounts::Id))
                    .col(string(BankAccounts::Name))
                    .col(string(BankAccounts::CurrencyCode))
                    .col(integer(BankAccounts::OwnerId))
                    .col(decimal_len(BankAccounts::CurrentBalance, 16, 4))
                    .col(integer_null(BankAccounts::MainIncomeScheduleId))
                    .col(string_len(BankAccounts::Kind, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_account_owner")
                            .from(BankAccounts::Table, BankAccounts::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create recurring_schedules table
        manager
            .create_table(
                Table::create()
                    .table(RecurringSchedules::Table)
                    .if_not_exists()
                    .col(pk_auto(RecurringSchedules::Id))
                    .col(integer(RecurringSchedules::AccountId))
                    .col(string_len(RecurringSchedules::Kind, 10))
                    .col(string(RecurringSchedules::DisplayName))
                    .col(decimal_len(RecurringSchedules::ExpectedAmount, 16, 4))
                    .col(string_len(RecurringSchedules::Period, 20))
                    .col(date(RecurringSchedules::AnchorDate))
                    .col(integer_null(RecurringSchedules::SecondDay))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recurring_schedule_account")
                            .from(RecurringSchedules::Table, RecurringSchedules::AccountId)
                            .to(BankAccounts::Table, BankAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create expected_occurrences table
        manager
            .create_table(
                Table::create()
                    .table(ExpectedOccurrences::Table)
                    .if_not_exists()
                    .col(pk_auto(ExpectedOccurrences::Id))
                    .col(integer(ExpectedOccurrences::ScheduleId))
                    .col(integer(ExpectedOccurrences::AccountId))
                    .col(string_len(ExpectedOccurrences::Kind, 10))
                    .col(date(ExpectedOccurrences::ExpectedDate))
                    .col(decimal_len(ExpectedOccurrences::ExpectedAmount, 16, 4))
                    .col(date_null(ExpectedOccurrences::PendingDate))
                    .col(date_null(ExpectedOccurrences::SettledDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expected_occurrence_schedule")
                            .from(ExpectedOccurrences::Table, ExpectedOccurrences::ScheduleId)
                            .to(RecurringSchedules::Table, RecurringSchedules::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expected_occurrence_account")
                            .from(ExpectedOccurrences::Table, ExpectedOccurrences::AccountId)
                            .to(BankAccounts::Table, BankAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the forecast window range scan
        manager
            .create_index(
                Index::create()
                    .name("idx_expected_occurrences_account_date")
                    .table(ExpectedOccurrences::Table)
                    .col(ExpectedOccurrences::AccountId)
                    .col(ExpectedOccurrences::ExpectedDate)
                    .to_owned(),
            )
            .await?;

        // Create bank_transactions table
        manager
            .create_table(
                Table::create()
                    .table(BankTransactions::Table)
                    .if_not_exists()
                    .col(pk_auto(BankTransactions::Id))
                    .col(integer(BankTransactions::AccountId))
                    .col(decimal_len(BankTransactions::Amount, 16, 4))
                    .col(date(BankTransactions::TransactionDate))
                    .col(string(BankTransactions::DisplayName))
                    .col(boolean(BankTransactions::Pending).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_transaction_account")
                            .from(BankTransactions::Table, BankTransactions::AccountId)
                            .to(BankAccounts::Table, BankAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for pending/recent transaction lookbacks
        manager
            .create_index(
                Index::create()
                    .name("idx_bank_transactions_account_date")
                    .table(BankTransactions::Table)
                    .col(BankTransactions::AccountId)
                    .col(BankTransactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpectedOccurrences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecurringSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    Name,
    CurrencyCode,
    OwnerId,
    CurrentBalance,
    MainIncomeScheduleId,
    Kind,
}

#[derive(DeriveIden)]
enum RecurringSchedules {
    Table,
    Id,
    AccountId,
    Kind,
    DisplayName,
    ExpectedAmount,
    Period,
    AnchorDate,
    SecondDay,
}

#[derive(DeriveIden)]
enum ExpectedOccurrences {
    Table,
    Id,
    ScheduleId,
    AccountId,
    Kind,
    ExpectedDate,
    ExpectedAmount,
    PendingDate,
    SettledDate,
}

#[derive(DeriveIden)]
enum BankTransactions {
    Table,
    Id,
    AccountId,
    Amount,
    TransactionDate,
    DisplayName,
    Pending,
}
