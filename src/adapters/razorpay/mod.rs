//! Razorpay adapter: the production `PaymentGateway` implementation.

mod gateway;
mod types;

pub use gateway::{RazorpayConfig, RazorpayGateway};
