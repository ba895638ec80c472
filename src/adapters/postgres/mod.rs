//! PostgreSQL adapters for the persistence ports.

mod journal_store;
mod subscription_store;
mod transaction_log;

pub use journal_store::PostgresJournalStore;
pub use subscription_store::PostgresSubscriptionStore;
pub use transaction_log::PostgresTransactionLog;
