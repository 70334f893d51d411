//! # STK Callback Handling
//!
//! Daraja posts the asynchronous payment result to the configured callback
//! URL. The relay acknowledges every delivery; parsing only feeds logging.

use pay_core::RelayResult;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Callback envelope: `{"Body": {"stkCallback": {...}}}`
#[derive(Debug, Deserialize)]
struct CallbackEnvelope {
    #[serde(rename = "Body")]
    body: CallbackBody,
}

#[derive(Debug, Deserialize)]
struct CallbackBody {
    #[serde(rename = "stkCallback")]
    stk_callback: StkCallback,
}

/// Parsed `stkCallback` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkCallback {
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    pub result_code: i64,
    pub result_desc: String,
    #[serde(default)]
    pub callback_metadata: Option<CallbackMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackMetadata {
    #[serde(rename = "Item", default)]
    pub items: Vec<MetadataItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataItem {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value", default)]
    pub value: Option<serde_json::Value>,
}

impl StkCallback {
    /// Parse from a raw callback JSON value
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value::<CallbackEnvelope>(value.clone())
            .ok()
            .map(|env| env.body.stk_callback)
    }

    /// `ResultCode` 0 means the customer completed the payment
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    /// Look up a `CallbackMetadata` item by name
    pub fn metadata_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.callback_metadata
            .as_ref()?
            .items
            .iter()
            .find(|item| item.name == name)
            .and_then(|item| item.value.as_ref())
    }

    pub fn amount(&self) -> Option<f64> {
        self.metadata_value("Amount").and_then(|v| v.as_f64())
    }

    pub fn receipt_number(&self) -> Option<&str> {
        self.metadata_value("MpesaReceiptNumber")
            .and_then(|v| v.as_str())
    }

    pub fn phone_number(&self) -> Option<String> {
        self.metadata_value("PhoneNumber").map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Callback handler trait
///
/// Implement this trait to react to payment results.
#[allow(unused_variables)]
pub trait StkCallbackHandler: Send + Sync {
    /// Called when the customer completed the payment
    fn on_payment_completed(&self, callback: &StkCallback) -> RelayResult<()> {
        info!(
            "STK payment completed: checkout={}, receipt={:?}, amount={:?}, phone={:?}",
            callback.checkout_request_id,
            callback.receipt_number(),
            callback.amount(),
            callback.phone_number()
        );
        Ok(())
    }

    /// Called when the payment was cancelled, timed out or failed
    fn on_payment_failed(&self, callback: &StkCallback) -> RelayResult<()> {
        warn!(
            "STK payment failed: checkout={}, code={}, desc={}",
            callback.checkout_request_id, callback.result_code, callback.result_desc
        );
        Ok(())
    }

    /// Called for JSON that is not an STK callback
    fn on_unrecognized(&self, payload: &serde_json::Value) -> RelayResult<()> {
        debug!("Unrecognized callback shape: {}", payload);
        Ok(())
    }
}

/// Default handler (just logs callbacks)
pub struct LoggingStkCallbackHandler;

impl StkCallbackHandler for LoggingStkCallbackHandler {}

/// Full callback body as logged, every metadata item included
pub fn render_callback(payload: &serde_json::Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

/// Dispatch a raw callback body to the appropriate handler method.
///
/// Bodies that are empty or not JSON are logged and skipped.
pub fn dispatch_stk_callback(handler: &dyn StkCallbackHandler, body: &[u8]) -> RelayResult<()> {
    if body.is_empty() {
        info!("Callback received with empty body");
        return Ok(());
    }

    let payload: serde_json::Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(
                "Callback body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(body)
            );
            return Ok(());
        }
    };

    info!("Callback received: {}", render_callback(&payload));

    match StkCallback::from_value(&payload) {
        Some(callback) if callback.is_success() => handler.on_payment_completed(&callback),
        Some(callback) => handler.on_payment_failed(&callback),
        None => handler.on_unrecognized(&payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn completed_payload() -> serde_json::Value {
        json!({
            "Body": {
                "stkCallback": {
                    "MerchantRequestID": "29115-34620561-1",
                    "CheckoutRequestID": "ws_CO_191220191020363925",
                    "ResultCode": 0,
                    "ResultDesc": "The service request is processed successfully.",
                    "CallbackMetadata": {
                        "Item": [
                            {"Name": "Amount", "Value": 1.00},
                            {"Name": "MpesaReceiptNumber", "Value": "NLJ7RT61SV"},
                            {"Name": "Balance"},
                            {"Name": "TransactionDate", "Value": 20191219102115u64},
                            {"Name": "PhoneNumber", "Value": 254708374149u64}
                        ]
                    }
                }
            }
        })
    }

    fn cancelled_payload() -> serde_json::Value {
        json!({
            "Body": {
                "stkCallback": {
                    "MerchantRequestID": "29115-34620561-1",
                    "CheckoutRequestID": "ws_CO_191220191020363925",
                    "ResultCode": 1032,
                    "ResultDesc": "Request cancelled by user."
                }
            }
        })
    }

    #[derive(Default)]
    struct CountingHandler {
        completed: AtomicUsize,
        failed: AtomicUsize,
        unrecognized: AtomicUsize,
    }

    impl StkCallbackHandler for CountingHandler {
        fn on_payment_completed(&self, _callback: &StkCallback) -> RelayResult<()> {
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_payment_failed(&self, _callback: &StkCallback) -> RelayResult<()> {
            self.failed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_unrecognized(&self, _payload: &serde_json::Value) -> RelayResult<()> {
            self.unrecognized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_parse_completed_callback() {
        let callback = StkCallback::from_value(&completed_payload()).unwrap();

        assert!(callback.is_success());
        assert_eq!(callback.checkout_request_id, "ws_CO_191220191020363925");
        assert_eq!(callback.receipt_number(), Some("NLJ7RT61SV"));
        assert_eq!(callback.amount(), Some(1.0));
        assert_eq!(callback.phone_number().as_deref(), Some("254708374149"));
        assert!(callback.metadata_value("Balance").is_none());
    }

    #[test]
    fn test_parse_cancelled_callback() {
        let callback = StkCallback::from_value(&cancelled_payload()).unwrap();

        assert!(!callback.is_success());
        assert_eq!(callback.result_code, 1032);
        assert!(callback.receipt_number().is_none());
    }

    #[test]
    fn test_dispatch_routes_by_result() {
        let handler = CountingHandler::default();

        dispatch_stk_callback(&handler, completed_payload().to_string().as_bytes()).unwrap();
        dispatch_stk_callback(&handler, cancelled_payload().to_string().as_bytes()).unwrap();
        dispatch_stk_callback(&handler, br#"{"hello":"world"}"#).unwrap();

        assert_eq!(handler.completed.load(Ordering::SeqCst), 1);
        assert_eq!(handler.failed.load(Ordering::SeqCst), 1);
        assert_eq!(handler.unrecognized.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_callback_keeps_all_metadata() {
        let rendered = render_callback(&completed_payload());

        for name in [
            "Amount",
            "MpesaReceiptNumber",
            "Balance",
            "TransactionDate",
            "PhoneNumber",
        ] {
            assert!(rendered.contains(name), "missing {name}");
        }
        assert!(rendered.contains("20191219102115"));
    }

    #[test]
    fn test_dispatch_tolerates_empty_and_garbage() {
        let handler = CountingHandler::default();

        assert!(dispatch_stk_callback(&handler, b"").is_ok());
        assert!(dispatch_stk_callback(&handler, b"not json").is_ok());
        assert_eq!(handler.unrecognized.load(Ordering::SeqCst), 0);
    }
}
