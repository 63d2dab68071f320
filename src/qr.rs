//! QR payment intents: the JSON text rendered into a scannable code, and
//! the tolerant parse of whatever comes back from a scanner.

use serde::{Deserialize, Serialize};

use crate::{ClientError, Result};

/// What a payment QR encodes: the payee address and a requested amount in
/// APT, both as the strings the form holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub address: String,
    pub amount: String,
}

/// A scanned code after parsing. Either field may be absent; callers merge
/// what is present into their form state and keep the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScannedIntent {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

impl ScannedIntent {
    /// Merge into existing form fields, overwriting only what the scan
    /// actually carried.
    pub fn apply(&self, address: &mut String, amount: &mut String) {
        if let Some(scanned) = &self.address {
            *address = scanned.clone();
        }
        if let Some(scanned) = &self.amount {
            *amount = scanned.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.amount.is_none()
    }
}

/// Serialize an intent into the QR text. Succeeds for any well-formed
/// intent.
pub fn encode(intent: &PaymentIntent) -> Result<String> {
    serde_json::to_string(intent).map_err(|e| ClientError::MalformedCode(e.to_string()))
}

/// Parse scanned QR text back into a (possibly partial) intent.
pub fn decode(text: &str) -> Result<ScannedIntent> {
    serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "discarding unparseable QR text");
        ClientError::MalformedCode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let intent = PaymentIntent {
            address: "0xabc".to_string(),
            amount: "1.5".to_string(),
        };
        let text = encode(&intent).unwrap();
        let scanned = decode(&text).unwrap();
        assert_eq!(scanned.address.as_deref(), Some("0xabc"));
        assert_eq!(scanned.amount.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(decode("not json"), Err(ClientError::MalformedCode(_))));
        assert!(matches!(decode(""), Err(ClientError::MalformedCode(_))));
    }

    #[test]
    fn test_decode_accepts_partial_intents() {
        let scanned = decode(r#"{"address": "0xabc"}"#).unwrap();
        assert_eq!(scanned.address.as_deref(), Some("0xabc"));
        assert_eq!(scanned.amount, None);

        let scanned = decode("{}").unwrap();
        assert!(scanned.is_empty());
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut address = "0xold".to_string();
        let mut amount = "9.9".to_string();

        decode(r#"{"amount": "1.5"}"#)
            .unwrap()
            .apply(&mut address, &mut amount);
        assert_eq!(address, "0xold");
        assert_eq!(amount, "1.5");
    }

    #[test]
    fn test_failed_decode_leaves_form_state_alone() {
        let mut address = "0xold".to_string();
        let mut amount = "9.9".to_string();

        if let Ok(scanned) = decode("not json") {
            scanned.apply(&mut address, &mut amount);
        }
        assert_eq!(address, "0xold");
        assert_eq!(amount, "9.9");
    }
}
