//! Subscription domain: plans, entitlement records, payment signature
//! verification and the billing audit trail.

mod entitlement;
mod errors;
mod plan;
mod provider;
mod record;
mod signature;
mod status;
mod transaction;

pub use entitlement::{build_pro_entitlement, PaymentOutcome, VerifiedPayment};
pub use errors::BillingError;
pub use plan::{find_offering, PlanOffering, SubscriptionPlan};
pub use provider::BillingProvider;
pub use record::{
    FeatureLimits, FeatureUsage, MeteredFeature, QuotaDecision, SubscriptionRecord,
    BILLING_CYCLE_DAYS, UNLIMITED,
};
pub use signature::PaymentSignatureVerifier;
pub use status::SubscriptionStatus;
pub use transaction::{PaymentTransaction, TransactionStatus};
