//! Subscription plan definitions and the purchasable plan catalog.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Subscription plan level.
///
/// Determines feature access and usage limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// Free plan - metered access to chat, voice and video sessions.
    Free,

    /// Pro plan - unlimited access across all session types.
    Pro,
}

impl SubscriptionPlan {
    /// Returns true if this plan is a paid plan.
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionPlan::Pro)
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "Free",
            SubscriptionPlan::Pro => "Pro",
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A purchasable one-time offering in the plan catalog.
///
/// Amounts are integer minor currency units (paise) to avoid
/// floating-point money errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOffering {
    /// Catalog key sent by the client (`planName` in the order request).
    pub name: &'static str,
    /// Commercial label recorded on transactions.
    pub label: &'static str,
    /// Price in minor currency units.
    pub amount_minor: i64,
    /// ISO currency code.
    pub currency: &'static str,
}

static CATALOG: Lazy<Vec<PlanOffering>> = Lazy::new(|| {
    vec![
        PlanOffering {
            name: "pro_monthly",
            label: "Mindhaven Pro (Monthly)",
            amount_minor: 49_900,
            currency: "INR",
        },
        PlanOffering {
            name: "pro_yearly",
            label: "Mindhaven Pro (Yearly)",
            amount_minor: 499_900,
            currency: "INR",
        },
    ]
});

/// Looks up a purchasable offering by its catalog key.
///
/// Returns `None` for unknown names; the HTTP layer maps that to a 400.
pub fn find_offering(name: &str) -> Option<&'static PlanOffering> {
    CATALOG.iter().find(|o| o.name == name)
}
