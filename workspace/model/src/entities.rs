//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the cash-advance banking backend here:
//! bank accounts read through the aggregator, detected recurring schedules,
//! their predicted occurrences, and observed bank transactions.

pub mod bank_account;
pub mod bank_transaction;
pub mod expected_occurrence;
pub mod recurring_schedule;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::bank_account::Entity as BankAccount;
    pub use super::bank_transaction::Entity as BankTransaction;
    pub use super::expected_occurrence::Entity as ExpectedOccurrence;
    pub use super::recurring_schedule::Entity as RecurringSchedule;
    pub use super::user::Entity as User;
}
