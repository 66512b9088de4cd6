//! Common transport-layer types shared between the backend and API
//! consumers. These structs mirror the forecast engine's output shapes so
//! the dashboard and mobile clients can deserialize responses without
//! duplicating them.

mod forecast;
mod projection;

pub use forecast::{CashFlowKind, ForecastDto, ObservedTransactionDto, ProjectedOccurrenceDto};
pub use projection::{BalancePoint, BalanceProjectionSeries, DateRange};
