//! Payment signature verification.
//!
//! The gateway signs each settled payment with HMAC-SHA256 over a
//! canonical string, keyed by the API key secret. One-time orders and
//! recurring subscriptions are signed differently:
//!
//! - orders: `"<order_id>|<payment_id>"`
//! - subscriptions: `"<payment_id>|<subscription_id>"`
//!
//! Verification never errors: any missing field, undecodable hex or
//! mismatch returns `false`. A missing secret is a startup-time
//! configuration failure, not a per-call condition.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for gateway payment signatures.
pub struct PaymentSignatureVerifier {
    secret: SecretString,
}

impl PaymentSignatureVerifier {
    /// Creates a verifier keyed with the gateway key secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies a one-time order capture.
    pub fn verify_order(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        if order_id.is_empty() || payment_id.is_empty() {
            return false;
        }
        self.verify(&format!("{}|{}", order_id, payment_id), signature)
    }

    /// Verifies a recurring-subscription capture.
    ///
    /// The gateway reverses the operand order for subscriptions.
    pub fn verify_subscription(
        &self,
        payment_id: &str,
        subscription_id: &str,
        signature: &str,
    ) -> bool {
        if payment_id.is_empty() || subscription_id.is_empty() {
            return false;
        }
        self.verify(&format!("{}|{}", payment_id, subscription_id), signature)
    }

    /// Signs the order canonical string. Used by tests and fakes.
    pub fn sign_order(&self, order_id: &str, payment_id: &str) -> String {
        self.sign(&format!("{}|{}", order_id, payment_id))
    }

    /// Signs the subscription canonical string. Used by tests and fakes.
    pub fn sign_subscription(&self, payment_id: &str, subscription_id: &str) -> String {
        self.sign(&format!("{}|{}", payment_id, subscription_id))
    }

    fn verify(&self, canonical: &str, signature: &str) -> bool {
        let provided = match hex::decode(signature) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let expected = self.compute(canonical);
        constant_time_compare(&expected, &provided)
    }

    fn sign(&self, canonical: &str) -> String {
        hex::encode(self.compute(canonical))
    }

    fn compute(&self, canonical: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(canonical.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks from leaking the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
