pub mod accounts;
pub mod forecast;
pub mod health;
pub mod occurrences;
pub mod projection;
pub mod schedules;
pub mod transactions;
pub mod users;
