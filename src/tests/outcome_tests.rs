#[cfg(test)]
mod tests {
    use log::{ debug, info };
    use serde_json::json;

    use crate::models::outcome::{ payload_from_value, Outcome, OutcomeError, Payload, Severity };
    use crate::tests::setup;

    fn conflict_payload() -> Payload {
        let mut payload = Payload::new();
        payload.insert("conflictingSessionId".to_string(), json!(42));
        payload
    }

    #[test]
    fn test_success_is_accepted_info() {
        setup();
        let outcome = Outcome::success();

        assert!(outcome.is_accepted(), "Success should be accepted");
        assert_eq!(outcome.severity(), Severity::Info);
        assert_eq!(outcome.message(), "", "Message should default to empty");
        assert!(outcome.payload().is_empty(), "Payload should default to empty");
        assert!(!outcome.is_error());
        assert!(!outcome.is_warning());
    }

    #[test]
    fn test_success_with_keeps_message_and_payload() {
        setup();
        let outcome = Outcome::success_with("Slot is free", conflict_payload());

        assert!(outcome.is_accepted());
        assert_eq!(outcome.severity(), Severity::Info);
        assert_eq!(outcome.message(), "Slot is free");
        assert_eq!(outcome.payload().get("conflictingSessionId"), Some(&json!(42)));
    }

    #[test]
    fn test_error_is_rejected() {
        setup();
        let outcome = Outcome::error_with(
            "Time slot overlaps existing session",
            conflict_payload()
        );

        assert!(!outcome.is_accepted(), "Error should not be accepted");
        assert!(outcome.is_error());
        assert!(!outcome.is_warning());
        assert_eq!(outcome.severity(), Severity::Error);
        assert_eq!(outcome.payload(), &conflict_payload());
    }

    #[test]
    fn test_error_without_payload_has_empty_payload() {
        setup();
        let outcome = Outcome::error("Nope");
        assert!(outcome.payload().is_empty());
    }

    #[test]
    fn test_warning_is_accepted() {
        setup();
        let mut payload = Payload::new();
        payload.insert("gapMinutes".to_string(), json!(5));
        let outcome = Outcome::warning_with(
            "Session starts 5 minutes after previous ends",
            payload
        );

        assert!(outcome.is_accepted(), "Warning should be accepted");
        assert!(outcome.is_warning());
        assert!(!outcome.is_error());
        assert_eq!(outcome.severity(), Severity::Warning);
        assert!(Outcome::warning("careful").payload().is_empty());
    }

    #[test]
    fn test_factories_never_break_invariants() {
        setup();
        let messages = ["", "a", "Time slot overlaps existing session"];
        for message in messages {
            let outcomes = [
                Outcome::success_with(message, Payload::new()),
                Outcome::error(message),
                Outcome::warning(message),
                Outcome::success_with(message, conflict_payload()),
                Outcome::error_with(message, conflict_payload()),
                Outcome::warning_with(message, conflict_payload()),
            ];
            for outcome in outcomes {
                debug!("Checking invariants for {}", outcome);
                if !outcome.is_accepted() {
                    assert_eq!(outcome.severity(), Severity::Error);
                }
                if outcome.severity() == Severity::Warning {
                    assert!(outcome.is_accepted());
                }
            }
        }
    }

    #[test]
    fn test_to_json_shape() {
        setup();
        let outcome = Outcome::error_with(
            "Time slot overlaps existing session",
            conflict_payload()
        );

        assert_eq!(
            outcome.to_json(),
            json!({
                "accepted": false,
                "message": "Time slot overlaps existing session",
                "severity": "error",
                "payload": { "conflictingSessionId": 42 }
            })
        );
        assert_eq!(Outcome::success().to_json()["payload"], json!({}));
    }

    #[test]
    fn test_serde_matches_to_json() {
        setup();
        let outcome = Outcome::warning_with("Close to another session", conflict_payload());
        let value = serde_json::to_value(&outcome).expect("outcome serializes");
        assert_eq!(value, outcome.to_json());
    }

    #[test]
    fn test_from_json_restores_fields() {
        setup();
        for outcome in [
            Outcome::success(),
            Outcome::error_with("Time slot overlaps existing session", conflict_payload()),
            Outcome::warning_with(
                "Session starts 5 minutes after previous ends",
                conflict_payload()
            ),
        ] {
            let restored = Outcome::from_json(outcome.to_json()).expect("valid outcome");
            info!("Restored {}", restored);
            assert_eq!(restored, outcome);
        }
    }

    #[test]
    fn test_deserialize_defaults_missing_message_and_payload() {
        setup();
        let minimal = json!({ "accepted": true, "severity": "info" });
        let outcome: Outcome = serde_json::from_value(minimal).expect("minimal outcome");
        assert_eq!(outcome, Outcome::success());

        let null_payload = json!({ "accepted": true, "severity": "info", "payload": null });
        let outcome: Outcome = serde_json::from_value(null_payload).expect("null payload");
        assert!(outcome.payload().is_empty());
    }

    #[test]
    fn test_from_json_rejects_inconsistent_combinations() {
        setup();
        let cases = [(false, "info"), (false, "warning"), (true, "error")];
        for (accepted, severity) in cases {
            let value = json!({ "accepted": accepted, "message": "", "severity": severity });
            let result = Outcome::from_json(value.clone());
            assert!(
                matches!(result, Err(OutcomeError::InconsistentOutcome { .. })),
                "{} should be rejected",
                value
            );
            assert!(serde_json::from_value::<Outcome>(value).is_err());
        }
    }

    #[test]
    fn test_from_json_rejects_unknown_severity() {
        setup();
        let result = Outcome::from_json(json!({ "accepted": true, "severity": "notice" }));
        assert!(matches!(result, Err(OutcomeError::Malformed(_))));
    }

    #[test]
    fn test_severity_parsing() {
        setup();
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!(" Warning ".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("INFO".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!(
            "fatal".parse::<Severity>(),
            Err(OutcomeError::UnknownSeverity("fatal".to_string()))
        );
    }

    #[test]
    fn test_display() {
        setup();
        assert_eq!(Outcome::success().to_string(), "[info]");
        assert_eq!(Outcome::error("Slot taken").to_string(), "[error] Slot taken");
    }

    #[test]
    fn test_payload_from_value() {
        setup();
        let payload = payload_from_value(json!({ "gapMinutes": 5 })).expect("object payload");
        assert_eq!(payload.get("gapMinutes"), Some(&json!(5)));
        assert!(payload_from_value(json!(null)).expect("null payload").is_empty());
        assert!(payload_from_value(json!([1, 2])).is_err());
    }
}
