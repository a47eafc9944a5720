//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use serde_json::json;
    use tokentally_core::UsageRecord;

    fn record(value: serde_json::Value) -> UsageRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_ledger_record_line() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format_record(&record(json!({
            "event_id": "evt_1",
            "units": 12.5,
            "model": "gpt-4o",
            "provider": "openai",
            "customer_id": "acme"
        })));

        assert_eq!(line, "acme openai gpt-4o 12.5");
    }

    #[test]
    fn test_partial_ledger_record_skips_missing_fields() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format_record(&record(json!({"model": "claude", "units": 3})));

        assert_eq!(line, "claude 3");
    }

    #[test]
    fn test_other_record_prints_json() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format_record(&record(json!({"a": 1})));

        assert_eq!(line, r#"{"a":1}"#);
    }

    #[test]
    fn test_empty_records_message() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_records("http://h/api/trpc/usage", &[]);

        assert_eq!(output, "http://h/api/trpc/usage (0 records)\nNo usage records.");
    }

    #[test]
    fn test_header_counts_records() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_records("src", &[record(json!({"a": 1}))]);

        assert!(output.starts_with("src (1 record)\n"));
    }

    #[test]
    fn test_colors_only_when_enabled() {
        let plain = TextFormatter::new(false).format_records("src", &[]);
        let colored = TextFormatter::new(true).format_records("src", &[]);

        assert!(!plain.contains("\x1b["));
        assert!(colored.contains("\x1b[1m"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, UsageOutput};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_usage_output_shape() {
        let records = vec![json!({"a": 1}).as_object().unwrap().clone()];
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let output = UsageOutput::new("http://h/api/trpc/usage", fetched_at, &records);

        let text = JsonFormatter::new(false).format(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "source": "http://h/api/trpc/usage",
                "fetchedAt": "2024-05-01T12:00:00+00:00",
                "count": 1,
                "records": [{"a": 1}]
            })
        );
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let formatter = JsonFormatter::new(true);
        let text = formatter.format(&json!({"a": 1})).unwrap();

        assert!(text.contains('\n'));
    }
}
