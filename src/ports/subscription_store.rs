//! Subscription store port.
//!
//! The persistence collaborator is an abstract per-document store: the
//! subscription fields of a user document are read and replaced as a
//! whole. Per-document update semantics must be at least
//! last-writer-wins with no partial-field corruption; concurrent
//! verifications for the same user are resolved by that guarantee.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::SubscriptionRecord;

/// Port for reading and replacing a user's subscription record.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Fetches the subscription record for a user.
    ///
    /// `None` means the user does not exist; users always carry a
    /// record (created as free/default at signup).
    async fn get(&self, user_id: &UserId) -> Result<Option<SubscriptionRecord>, DomainError>;

    /// Replaces the subscription fields of the user document in one
    /// update.
    async fn replace(
        &self,
        user_id: &UserId,
        record: &SubscriptionRecord,
    ) -> Result<(), DomainError>;
}
