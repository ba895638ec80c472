//! ManageSubscriptionHandler - lifecycle actions on a recurring
//! subscription.
//!
//! The action set is a closed enum dispatched through one exhaustive
//! match; adding or removing an action is a compile-time-checked change.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::subscription::BillingError;
use crate::ports::{GatewayInvoice, PaymentGateway};

/// Lifecycle action on a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManageAction {
    Cancel,
    Pause,
    Resume,
    Update,
    Invoices,
}

impl ManageAction {
    /// Parses the request-body action string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cancel" => Some(ManageAction::Cancel),
            "pause" => Some(ManageAction::Pause),
            "resume" => Some(ManageAction::Resume),
            "update" => Some(ManageAction::Update),
            "invoices" => Some(ManageAction::Invoices),
            _ => None,
        }
    }
}

/// Command for a subscription lifecycle action.
#[derive(Debug, Clone)]
pub struct ManageSubscriptionCommand {
    pub subscription_id: String,
    pub action: ManageAction,
    /// Target plan for `Update`; ignored otherwise.
    pub new_plan_id: Option<String>,
}

/// Result of a lifecycle action.
#[derive(Debug, Clone)]
pub enum ManageOutcome {
    /// The action completed with nothing to return.
    Done,
    /// Invoice listing for `Invoices`.
    Invoices(Vec<GatewayInvoice>),
}

/// Handler dispatching lifecycle actions to the gateway.
pub struct ManageSubscriptionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ManageSubscriptionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: ManageSubscriptionCommand,
    ) -> Result<ManageOutcome, BillingError> {
        if cmd.subscription_id.is_empty() {
            return Err(BillingError::validation(
                "subscriptionId",
                "Missing subscriptionId",
            ));
        }

        match cmd.action {
            ManageAction::Cancel => {
                self.gateway.cancel_subscription(&cmd.subscription_id).await?;
                Ok(ManageOutcome::Done)
            }
            ManageAction::Pause => {
                self.gateway.pause_subscription(&cmd.subscription_id).await?;
                Ok(ManageOutcome::Done)
            }
            ManageAction::Resume => {
                self.gateway.resume_subscription(&cmd.subscription_id).await?;
                Ok(ManageOutcome::Done)
            }
            ManageAction::Update => {
                let new_plan_id = cmd
                    .new_plan_id
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        BillingError::validation("newPlanId", "Missing newPlanId for update")
                    })?;
                self.gateway
                    .update_subscription(&cmd.subscription_id, new_plan_id)
                    .await?;
                Ok(ManageOutcome::Done)
            }
            ManageAction::Invoices => {
                let invoices = self
                    .gateway
                    .list_subscription_invoices(&cmd.subscription_id)
                    .await?;
                Ok(ManageOutcome::Invoices(invoices))
            }
        }
    }
}
