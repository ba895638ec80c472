//! Payment command handlers: order/subscription creation, lifecycle
//! management, and verification with entitlement application.

mod create_order;
mod create_subscription;
mod manage_subscription;
mod verify_payment;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use manage_subscription::{
    ManageAction, ManageOutcome, ManageSubscriptionCommand, ManageSubscriptionHandler,
};
pub use verify_payment::{VerifyOrderCommand, VerifyPaymentHandler, VerifySubscriptionCommand};
