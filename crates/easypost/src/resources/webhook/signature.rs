//! Verification of signed webhook deliveries.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::EasyPostError;
use crate::resources::event::Event;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "X-Hmac-Signature";

const SIGNATURE_PREFIX: &str = "hmac-sha256-hex=";

/// Verify a delivery signature using HMAC-SHA256.
///
/// # Arguments
/// * `body` - Raw request body bytes
/// * `signature` - Value of the `X-Hmac-Signature` header (`hmac-sha256-hex=<hex>`)
/// * `secret` - The webhook's secret
///
/// # Returns
/// `true` if the signature is valid, `false` otherwise
#[must_use]
pub fn verify_webhook_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    let Some(hex_digest) = signature.trim().strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(signature_bytes) = hex::decode(hex_digest) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let computed = mac.finalize().into_bytes();

    computed.as_slice().ct_eq(&signature_bytes).into()
}

/// Check a delivery's signature and decode the event it carries.
///
/// # Errors
///
/// Returns a validation error when the signature does not match, or a
/// deserialization error when the body is not an event.
pub fn validate_webhook(body: &[u8], signature: &str, secret: &str) -> Result<Event, EasyPostError> {
    if !verify_webhook_signature(body, signature, secret) {
        return Err(EasyPostError::Validation(
            "webhook received did not originate from EasyPost or had a webhook secret mismatch"
                .to_string(),
        ));
    }

    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(body: &[u8], secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature() {
        let body = br#"{"id":"evt_1","object":"Event","description":"batch.created"}"#;
        let signature = sign(body, "sekrit");

        assert!(verify_webhook_signature(body, &signature, "sekrit"));
        let event = validate_webhook(body, &signature, "sekrit").unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.resource_type(), Some("batch"));
    }

    #[test]
    fn test_rejects_wrong_secret_or_tampered_body() {
        let body = br#"{"id":"evt_1"}"#;
        let signature = sign(body, "sekrit");

        assert!(!verify_webhook_signature(body, &signature, "other"));
        assert!(!verify_webhook_signature(br#"{"id":"evt_2"}"#, &signature, "sekrit"));
        assert!(matches!(
            validate_webhook(body, &signature, "other"),
            Err(EasyPostError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_header() {
        let body = br#"{"id":"evt_1"}"#;
        let signature = sign(body, "sekrit");
        let bare_hex = signature.trim_start_matches(SIGNATURE_PREFIX);

        assert!(!verify_webhook_signature(body, bare_hex, "sekrit"));
        assert!(!verify_webhook_signature(body, "hmac-sha256-hex=zz", "sekrit"));
    }
}
