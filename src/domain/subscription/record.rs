//! The per-user subscription record: plan, status, entitlement window,
//! feature limits and usage counters.
//!
//! Limits and usage use `-1` as the "unlimited" sentinel; every other
//! value is a non-negative count. Usage never exceeds its limit unless
//! the limit is unlimited.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{BillingProvider, SubscriptionPlan, SubscriptionStatus};

/// Sentinel meaning "no limit" in [`FeatureLimits`] and usage counters.
pub const UNLIMITED: i64 = -1;

/// Days in the fixed billing cycle. No calendar-month arithmetic.
pub const BILLING_CYCLE_DAYS: i64 = 30;

/// The metered companion features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeteredFeature {
    VideoSessions,
    VoiceCalls,
    ChatMessages,
}

impl MeteredFeature {
    /// Stable string form used in storage and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeteredFeature::VideoSessions => "video_sessions",
            MeteredFeature::VoiceCalls => "voice_calls",
            MeteredFeature::ChatMessages => "chat_messages",
        }
    }
}

/// Allowed count per feature. `-1` = unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    pub video_sessions: i64,
    pub voice_calls: i64,
    pub chat_messages: i64,
}

impl FeatureLimits {
    /// Limits granted on the free plan.
    pub fn free_defaults() -> Self {
        Self {
            video_sessions: 2,
            voice_calls: 5,
            chat_messages: 100,
        }
    }

    /// Unlimited across every metered feature (paid entitlement).
    pub fn unlimited() -> Self {
        Self {
            video_sessions: UNLIMITED,
            voice_calls: UNLIMITED,
            chat_messages: UNLIMITED,
        }
    }

    /// Limit for one feature.
    pub fn get(&self, feature: MeteredFeature) -> i64 {
        match feature {
            MeteredFeature::VideoSessions => self.video_sessions,
            MeteredFeature::VoiceCalls => self.voice_calls,
            MeteredFeature::ChatMessages => self.chat_messages,
        }
    }
}

/// Consumed count per feature, plus the window anchor for monthly resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUsage {
    pub video_sessions: i64,
    pub voice_calls: i64,
    pub chat_messages: i64,
    pub last_reset_date: Timestamp,
}

impl FeatureUsage {
    /// Zeroed counters anchored at `now`.
    pub fn zero(now: Timestamp) -> Self {
        Self {
            video_sessions: 0,
            voice_calls: 0,
            chat_messages: 0,
            last_reset_date: now,
        }
    }

    /// Consumed count for one feature.
    pub fn get(&self, feature: MeteredFeature) -> i64 {
        match feature {
            MeteredFeature::VideoSessions => self.video_sessions,
            MeteredFeature::VoiceCalls => self.voice_calls,
            MeteredFeature::ChatMessages => self.chat_messages,
        }
    }

    fn get_mut(&mut self, feature: MeteredFeature) -> &mut i64 {
        match feature {
            MeteredFeature::VideoSessions => &mut self.video_sessions,
            MeteredFeature::VoiceCalls => &mut self.voice_calls,
            MeteredFeature::ChatMessages => &mut self.chat_messages,
        }
    }
}

/// Outcome of a quota consumption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaDecision {
    /// One unit consumed; the record was mutated.
    Consumed,
    /// The feature is at its limit for this window.
    Exhausted { feature: MeteredFeature, limit: i64 },
}

/// A user's subscription state. One record per user, mutated only through
/// verified payment application and explicit lifecycle actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub plan: SubscriptionPlan,
    /// Free-text label of the commercial offering.
    pub plan_name: String,
    pub status: SubscriptionStatus,
    /// Entitlement expiry. `None` until a first payment is applied.
    pub current_period_end: Option<Timestamp>,
    pub provider: BillingProvider,
    /// Provider-issued order or recurring-subscription id of the most
    /// recently verified payment event.
    pub subscription_id: Option<String>,
    pub limits: FeatureLimits,
    pub usage: FeatureUsage,
}

impl SubscriptionRecord {
    /// The record every user starts with.
    pub fn free_default(now: Timestamp) -> Self {
        Self {
            plan: SubscriptionPlan::Free,
            plan_name: SubscriptionPlan::Free.display_name().to_string(),
            status: SubscriptionStatus::Inactive,
            current_period_end: None,
            provider: BillingProvider::Manual,
            subscription_id: None,
            limits: FeatureLimits::free_defaults(),
            usage: FeatureUsage::zero(now),
        }
    }

    /// True when the record grants a paid entitlement at `now`.
    pub fn is_entitlement_current(&self, now: Timestamp) -> bool {
        self.status == SubscriptionStatus::Active
            && self
                .current_period_end
                .map(|end| end.is_after(&now))
                .unwrap_or(false)
    }

    /// Zeroes the counters when the usage window is older than one
    /// billing cycle. Returns true if a reset happened.
    pub fn maybe_reset_usage(&mut self, now: Timestamp) -> bool {
        if now.days_since(&self.usage.last_reset_date) >= BILLING_CYCLE_DAYS {
            self.usage = FeatureUsage::zero(now);
            true
        } else {
            false
        }
    }

    /// Attempts to consume one unit of a metered feature.
    ///
    /// Applies the monthly reset first, then checks the limit. An
    /// unlimited (`-1`) limit always consumes; counters still advance so
    /// usage reporting stays meaningful.
    pub fn consume(&mut self, feature: MeteredFeature, now: Timestamp) -> QuotaDecision {
        self.maybe_reset_usage(now);

        let limit = self.limits.get(feature);
        let used = self.usage.get(feature);

        if limit != UNLIMITED && used >= limit {
            return QuotaDecision::Exhausted { feature, limit };
        }

        *self.usage.get_mut(feature) += 1;
        QuotaDecision::Consumed
    }

    /// Remaining units for a feature, `None` when unlimited.
    pub fn remaining(&self, feature: MeteredFeature) -> Option<i64> {
        let limit = self.limits.get(feature);
        if limit == UNLIMITED {
            None
        } else {
            Some((limit - self.usage.get(feature)).max(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::now()
    }

    #[test]
    fn free_default_starts_inactive_with_metered_limits() {
        let record = SubscriptionRecord::free_default(now());
        assert_eq!(record.plan, SubscriptionPlan::Free);
        assert_eq!(record.status, SubscriptionStatus::Inactive);
        assert_eq!(record.limits, FeatureLimits::free_defaults());
        assert!(record.subscription_id.is_none());
        assert!(!record.is_entitlement_current(now()));
    }

    #[test]
    fn entitlement_requires_active_and_unexpired() {
        let mut record = SubscriptionRecord::free_default(now());
        record.status = SubscriptionStatus::Active;
        record.current_period_end = Some(now().add_days(30));
        assert!(record.is_entitlement_current(now()));

        record.current_period_end = Some(now().add_days(-1));
        assert!(!record.is_entitlement_current(now()));

        record.current_period_end = Some(now().add_days(30));
        record.status = SubscriptionStatus::Cancelled;
        assert!(!record.is_entitlement_current(now()));
    }

    #[test]
    fn consume_advances_usage_until_limit() {
        let mut record = SubscriptionRecord::free_default(now());
        record.limits.video_sessions = 2;

        assert_eq!(
            record.consume(MeteredFeature::VideoSessions, now()),
            QuotaDecision::Consumed
        );
        assert_eq!(
            record.consume(MeteredFeature::VideoSessions, now()),
            QuotaDecision::Consumed
        );
        assert_eq!(
            record.consume(MeteredFeature::VideoSessions, now()),
            QuotaDecision::Exhausted {
                feature: MeteredFeature::VideoSessions,
                limit: 2
            }
        );
        assert_eq!(record.usage.video_sessions, 2);
    }

    #[test]
    fn unlimited_sentinel_never_exhausts() {
        let mut record = SubscriptionRecord::free_default(now());
        record.limits = FeatureLimits::unlimited();

        for _ in 0..1000 {
            assert_eq!(
                record.consume(MeteredFeature::ChatMessages, now()),
                QuotaDecision::Consumed
            );
        }
        assert_eq!(record.usage.chat_messages, 1000);
        assert_eq!(record.remaining(MeteredFeature::ChatMessages), None);
    }

    #[test]
    fn usage_resets_after_a_billing_cycle() {
        let start = now();
        let mut record = SubscriptionRecord::free_default(start);
        record.limits.voice_calls = 1;

        assert_eq!(
            record.consume(MeteredFeature::VoiceCalls, start),
            QuotaDecision::Consumed
        );
        assert!(matches!(
            record.consume(MeteredFeature::VoiceCalls, start),
            QuotaDecision::Exhausted { .. }
        ));

        let next_cycle = start.add_days(BILLING_CYCLE_DAYS);
        assert_eq!(
            record.consume(MeteredFeature::VoiceCalls, next_cycle),
            QuotaDecision::Consumed
        );
        assert_eq!(record.usage.voice_calls, 1);
        assert_eq!(record.usage.last_reset_date, next_cycle);
    }

    #[test]
    fn no_reset_within_the_cycle() {
        let start = now();
        let mut record = SubscriptionRecord::free_default(start);
        record.consume(MeteredFeature::ChatMessages, start);

        assert!(!record.maybe_reset_usage(start.add_days(BILLING_CYCLE_DAYS - 1)));
        assert_eq!(record.usage.chat_messages, 1);
    }

    #[test]
    fn remaining_counts_down_and_floors_at_zero() {
        let mut record = SubscriptionRecord::free_default(now());
        record.limits.video_sessions = 2;
        assert_eq!(record.remaining(MeteredFeature::VideoSessions), Some(2));

        record.consume(MeteredFeature::VideoSessions, now());
        assert_eq!(record.remaining(MeteredFeature::VideoSessions), Some(1));

        record.usage.video_sessions = 5;
        assert_eq!(record.remaining(MeteredFeature::VideoSessions), Some(0));
    }
}
