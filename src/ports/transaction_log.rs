//! Payment transaction log port.
//!
//! Append-only: rows are inserted once and never updated or deleted.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{BillingProvider, PaymentTransaction};

/// Port for the billing audit trail.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Appends one settled payment event.
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), DomainError>;

    /// Looks up a transaction by provider payment id.
    ///
    /// Used as the idempotency check for redelivered callbacks.
    async fn find_by_transaction_id(
        &self,
        provider: BillingProvider,
        transaction_id: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError>;

    /// Lists a user's transactions, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentTransaction>, DomainError>;
}
