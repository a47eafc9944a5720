//! Integration tests for the usage envelope.

use serde_json::json;
use tokentally_core::{UsageEnvelope, UsageRecord};

#[test]
fn test_empty_data_is_not_an_error() {
    let envelope = UsageEnvelope::from_slice(br#"{"result":{"data":[]}}"#).unwrap();
    assert!(envelope.into_records().is_empty());
}

#[test]
fn test_ledger_shaped_record_passes_through() {
    let body = json!({
        "result": {
            "data": [{
                "event_id": "evt_1",
                "ts": "2024-05-01T12:00:00Z",
                "customer_id": "cust_9",
                "provider": "openai",
                "model": "gpt-4o",
                "metric_type": "tokens",
                "units": 1200.0,
                "unit_cost_usd": 0.00001
            }]
        }
    });

    let records = UsageEnvelope::from_slice(body.to_string().as_bytes())
        .unwrap()
        .into_records();

    let expected: UsageRecord = body["result"]["data"][0].as_object().unwrap().clone();
    assert_eq!(records, vec![expected]);
}
