//! In-memory implementations of the persistence ports.
//!
//! Used by the integration tests and local development wiring. State
//! lives in `RwLock`-guarded maps; semantics mirror the Postgres
//! adapters, including whole-record replace and missing-user errors.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, UserId};
use crate::domain::journal::JournalEntry;
use crate::domain::subscription::{BillingProvider, PaymentTransaction, SubscriptionRecord};
use crate::ports::{JournalStore, SubscriptionStore, TransactionLog};

/// In-memory `SubscriptionStore`.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    records: RwLock<HashMap<String, SubscriptionRecord>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user with a record, as user creation would.
    pub async fn seed(&self, user_id: &UserId, record: SubscriptionRecord) {
        self.records
            .write()
            .await
            .insert(user_id.as_str().to_string(), record);
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<SubscriptionRecord>, DomainError> {
        Ok(self.records.read().await.get(user_id.as_str()).cloned())
    }

    async fn replace(
        &self,
        user_id: &UserId,
        record: &SubscriptionRecord,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(user_id.as_str()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("No user document for {}", user_id),
            )),
        }
    }
}

/// In-memory `TransactionLog`.
#[derive(Default)]
pub struct InMemoryTransactionLog {
    transactions: RwLock<Vec<PaymentTransaction>>,
    /// When set, the next append fails. Lets tests exercise the
    /// persistence-inconsistency path.
    fail_next_append: RwLock<bool>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `append` call fail with a database error.
    pub async fn fail_next_append(&self) {
        *self.fail_next_append.write().await = true;
    }

    /// Number of rows in the log.
    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    /// True when the log is empty.
    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(&self, transaction: &PaymentTransaction) -> Result<(), DomainError> {
        let mut fail = self.fail_next_append.write().await;
        if *fail {
            *fail = false;
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "injected append failure",
            ));
        }
        drop(fail);

        self.transactions.write().await.push(transaction.clone());
        Ok(())
    }

    async fn find_by_transaction_id(
        &self,
        provider: BillingProvider,
        transaction_id: &str,
    ) -> Result<Option<PaymentTransaction>, DomainError> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .find(|t| t.provider == provider && t.transaction_id == transaction_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentTransaction>, DomainError> {
        let mut list: Vec<PaymentTransaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| &t.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.verified_at.cmp(&a.verified_at));
        Ok(list)
    }
}

/// In-memory `JournalStore`.
#[derive(Default)]
pub struct InMemoryJournalStore {
    entries: RwLock<Vec<JournalEntry>>,
}

impl InMemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalStore for InMemoryJournalStore {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, DomainError> {
        let mut list: Vec<JournalEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn delete(&self, user_id: &UserId, entry_id: &EntryId) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(&e.user_id == user_id && &e.id == entry_id));
        Ok(entries.len() < before)
    }
}
