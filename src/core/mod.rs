//! Core business logic: domain model, aggregation, classification, advice.

pub mod advice;
pub mod category;
pub mod config;
pub mod error;
pub mod holdings;
pub mod ledger;
pub mod log;
pub mod oracle;
pub mod snapshot;
pub mod store;
pub mod transaction;

// Re-export main types for cleaner imports
pub use error::{PriceFetchError, StoreError};
pub use holdings::{Holdings, HoldingsValuation};
pub use ledger::Ledger;
pub use oracle::{CryptoPriceProvider, FxRateProvider, PriceQuotes};
pub use snapshot::FinancialSnapshot;
pub use store::DocumentStore;
pub use transaction::{Transaction, TransactionKind};
