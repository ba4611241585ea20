#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::implementations::config::RulesConfig;
    use crate::implementations::schedule_rules::{
        CircleScheduleRule,
        PackageLimitRule,
        ScheduleConflictsRule,
        ScheduleShapeRule,
        ScheduleSlotsRule,
    };
    use crate::models::schedule::{
        CircleWindow,
        SessionStatus,
        SubscriptionWindow,
        WeeklySchedule,
        WeeklySlot,
    };
    use crate::tests::{ at, setup, slot };
    use crate::traits::rule::ScheduleRule;

    fn weekly(slots: &[(&str, &str)]) -> WeeklySchedule {
        WeeklySchedule {
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            pattern: Some("weekly".to_string()),
            sessions: slots
                .iter()
                .map(|(day, time)| WeeklySlot {
                    day: day.to_string(),
                    time: time.to_string(),
                    duration_minutes: None,
                })
                .collect(),
            now: Some(at(19, 8, 0)),
            existing: Vec::new(),
            circle: None,
        }
    }

    fn subscription(per_month: u32, remaining: u32) -> SubscriptionWindow {
        SubscriptionWindow {
            active: true,
            starts_at: None,
            ends_at: None,
            sessions_remaining: Some(remaining),
            sessions_per_month: Some(per_month),
        }
    }

    fn circle(active: bool, enrolled: u32, minimum: u32) -> CircleWindow {
        CircleWindow {
            active,
            enrolled_students: enrolled,
            min_students_to_start: minimum,
        }
    }

    #[test]
    fn test_shape_requires_sessions_pattern_and_start() {
        setup();
        let config = RulesConfig::default();

        let schedule = weekly(&[("monday", "10:00")]);
        assert!(ScheduleShapeRule.evaluate(&schedule, None, &config).is_accepted());

        let empty = weekly(&[]);
        assert_eq!(
            ScheduleShapeRule.evaluate(&empty, None, &config).message(),
            "Session times must be specified"
        );

        let mut schedule = weekly(&[("monday", "10:00")]);
        schedule.pattern = Some("  ".to_string());
        assert_eq!(
            ScheduleShapeRule.evaluate(&schedule, None, &config).message(),
            "A recurrence pattern must be specified"
        );

        let mut schedule = weekly(&[("monday", "10:00")]);
        schedule.start_date = None;
        assert_eq!(
            ScheduleShapeRule.evaluate(&schedule, None, &config).message(),
            "A start date must be specified"
        );
    }

    #[test]
    fn test_circle_must_be_active_and_filled() {
        setup();
        let config = RulesConfig::default();
        let mut schedule = weekly(&[("monday", "10:00")]);

        let outcome = CircleScheduleRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_accepted(), "No circle given");

        schedule.circle = Some(circle(true, 5, 3));
        assert!(CircleScheduleRule.evaluate(&schedule, None, &config).is_accepted());

        schedule.circle = Some(circle(true, 3, 3));
        let outcome = CircleScheduleRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_accepted(), "Minimum is inclusive");

        schedule.circle = Some(circle(false, 5, 3));
        let outcome = CircleScheduleRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "The circle is not active");

        schedule.circle = Some(circle(true, 2, 4));
        let outcome = CircleScheduleRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "Enrolled students (2) are fewer than the minimum (4)");
        assert_eq!(outcome.payload().get("enrolledStudents"), Some(&json!(2)));
        assert_eq!(outcome.payload().get("minStudentsToStart"), Some(&json!(4)));
    }

    #[test]
    fn test_slots_accept_valid_days_and_times() {
        setup();
        let config = RulesConfig::default();
        let schedule = weekly(&[("Saturday", "9:30"), ("monday", "23:59"), ("monday", "10:00")]);
        assert!(ScheduleSlotsRule.evaluate(&schedule, None, &config).is_accepted());
    }

    #[test]
    fn test_slots_reject_bad_day_and_time() {
        setup();
        let config = RulesConfig::default();

        let outcome = ScheduleSlotsRule.evaluate(&weekly(&[("funday", "10:00")]), None, &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "Invalid day: funday");
        assert_eq!(outcome.payload().get("day"), Some(&json!("funday")));

        for time in ["24:00", "10:60", "10", "ten"] {
            let outcome = ScheduleSlotsRule.evaluate(&weekly(&[("monday", time)]), None, &config);
            assert_eq!(outcome.message(), format!("Invalid time: {}", time));
        }
    }

    #[test]
    fn test_slots_reject_out_of_range_duration() {
        setup();
        let config = RulesConfig::default();

        for duration in [u32::MAX, 181, 10] {
            let mut schedule = weekly(&[("monday", "10:00"), ("monday", "10:30")]);
            for slot in &mut schedule.sessions {
                slot.duration_minutes = Some(duration);
            }

            let outcome = ScheduleSlotsRule.evaluate(&schedule, None, &config);
            assert!(outcome.is_error(), "Duration {} should be rejected", duration);
            assert_eq!(
                outcome.message(),
                "Session duration on monday at 10:00 must be between 15 and 180 minutes"
            );
            assert_eq!(outcome.payload().get("durationMinutes"), Some(&json!(duration)));
        }

        let mut schedule = weekly(&[("monday", "23:00")]);
        schedule.sessions[0].duration_minutes = Some(180);
        assert!(ScheduleSlotsRule.evaluate(&schedule, None, &config).is_accepted());
    }

    #[test]
    fn test_slots_reject_overlap_on_same_day() {
        setup();
        let config = RulesConfig::default();

        let outcome = ScheduleSlotsRule.evaluate(
            &weekly(&[("monday", "10:00"), ("tuesday", "10:30"), ("Monday", "10:30")]),
            None,
            &config
        );
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "Weekly slots overlap on monday at 10:30");
        assert_eq!(outcome.payload().get("overlapsWith"), Some(&json!("10:00")));

        // Back to back on the same day is fine
        let schedule = weekly(&[("monday", "10:00"), ("monday", "11:00")]);
        let outcome = ScheduleSlotsRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_conflicts_with_upcoming_sessions_on_same_weekday() {
        setup();
        let config = RulesConfig::default();

        // 2026-10-26 is a Monday
        let mut schedule = weekly(&[("tuesday", "10:00"), ("Monday", "10:30")]);
        schedule.existing = vec![slot(42, at(26, 10, 0), 60)];

        let outcome = ScheduleConflictsRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "Schedule conflict on monday at 10:30");
        assert_eq!(outcome.payload().get("conflictingSessionId"), Some(&json!(42)));
        assert_eq!(outcome.payload().get("conflictingStartsAt"), Some(&json!("2026-10-26 10:00")));
    }

    #[test]
    fn test_conflicts_ignore_other_days_past_and_cancelled() {
        setup();
        let config = RulesConfig::default();
        let mut schedule = weekly(&[("monday", "10:00")]);

        let mut cancelled = slot(43, at(26, 10, 0), 60);
        cancelled.status = SessionStatus::Cancelled;
        schedule.existing = vec![
            // Tuesday at the same time
            slot(41, at(27, 10, 0), 60),
            // Monday before "now"
            slot(42, at(12, 10, 0), 60),
            cancelled,
            // Monday, ends right as the weekly slot starts
            slot(44, at(26, 9, 0), 60)
        ];

        let outcome = ScheduleConflictsRule.evaluate(&schedule, None, &config);
        assert!(outcome.is_accepted(), "Unexpected conflict: {}", outcome);
    }

    #[test]
    fn test_conflicts_skip_malformed_slots() {
        setup();
        let config = RulesConfig::default();
        let mut schedule = weekly(&[("funday", "10:00"), ("monday", "10:xx")]);
        schedule.existing = vec![slot(42, at(26, 10, 0), 60)];

        assert!(ScheduleConflictsRule.evaluate(&schedule, None, &config).is_accepted());
    }

    #[test]
    fn test_package_limit() {
        setup();
        let config = RulesConfig::default();
        let schedule = weekly(&[("monday", "10:00"), ("wednesday", "10:00"), ("friday", "10:00")]);

        assert!(PackageLimitRule.evaluate(&schedule, None, &config).is_accepted());
        let outcome = PackageLimitRule.evaluate(&schedule, Some(&subscription(12, 5)), &config);
        assert!(outcome.is_accepted());

        let outcome = PackageLimitRule.evaluate(&schedule, Some(&subscription(8, 5)), &config);
        assert!(outcome.is_error());
        assert_eq!(
            outcome.message(),
            "Weekly session count (3) exceeds the package limit (8 sessions per month)"
        );
        assert_eq!(outcome.payload().get("sessionsPerWeek"), Some(&json!(3)));
        assert_eq!(outcome.payload().get("packageLimit"), Some(&json!(8)));

        let outcome = PackageLimitRule.evaluate(&schedule, Some(&subscription(12, 0)), &config);
        assert_eq!(outcome.message(), "No sessions remaining in the subscription");
    }

    #[test]
    fn test_package_limit_overflow_exceeds_limit() {
        setup();
        let config = RulesConfig { weeks_per_month: u32::MAX, ..RulesConfig::default() };
        let schedule = weekly(&[("monday", "10:00"), ("friday", "10:00")]);

        let unlimited = subscription(u32::MAX, 5);
        let outcome = PackageLimitRule.evaluate(&schedule, Some(&unlimited), &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.payload().get("packageLimit"), Some(&json!(u32::MAX)));
    }

    #[test]
    fn test_package_limit_requires_known_balance() {
        setup();
        let config = RulesConfig::default();
        let schedule = weekly(&[("monday", "10:00")]);
        let mut unknown = subscription(8, 5);
        unknown.sessions_remaining = None;

        let outcome = PackageLimitRule.evaluate(&schedule, Some(&unknown), &config);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "No sessions remaining in the subscription");
    }
}
