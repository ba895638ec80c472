//! Quota reservation for metered companion features.
//!
//! A reservation consumes one unit on an in-memory copy of the record;
//! the copy is only persisted after the provider call succeeds, so a
//! failed call never burns quota. Two racing requests can both reserve
//! the last unit; the store's last-writer-wins replace makes that an
//! accepted off-by-one, not corruption.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{MeteredFeature, QuotaDecision, SubscriptionRecord};
use crate::ports::SubscriptionStore;

/// A consumed-but-unpersisted quota unit.
#[derive(Debug)]
pub struct QuotaReservation {
    record: SubscriptionRecord,
}

/// Loads the user's record and consumes one unit of `feature` on a copy.
///
/// # Errors
///
/// - `UserNotFound` when no record exists
/// - `QuotaExceeded` when the feature is at its limit
pub async fn reserve(
    store: &dyn SubscriptionStore,
    user_id: &UserId,
    feature: MeteredFeature,
) -> Result<QuotaReservation, DomainError> {
    let mut record = store.get(user_id).await?.ok_or_else(|| {
        DomainError::new(
            ErrorCode::UserNotFound,
            format!("No subscription record for {}", user_id),
        )
    })?;

    match record.consume(feature, Timestamp::now()) {
        QuotaDecision::Consumed => Ok(QuotaReservation { record }),
        QuotaDecision::Exhausted { feature, limit } => Err(DomainError::new(
            ErrorCode::QuotaExceeded,
            format!("{} limit of {} reached for this cycle", feature.as_str(), limit),
        )),
    }
}

/// Persists a reservation after the provider call succeeded.
pub async fn commit(
    store: &dyn SubscriptionStore,
    user_id: &UserId,
    reservation: QuotaReservation,
) -> Result<(), DomainError> {
    store.replace(user_id, &reservation.record).await
}
