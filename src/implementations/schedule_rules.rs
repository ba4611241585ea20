use chrono::{ Datelike, Local, Timelike, Weekday };
use log::debug;
use regex::Regex;
use serde_json::json;

use crate::implementations::config::RulesConfig;
use crate::models::outcome::{ Outcome, Payload };
use crate::models::schedule::{
    SessionSlot,
    SessionStatus,
    SubscriptionWindow,
    WeeklySchedule,
    WeeklySlot,
};
use crate::traits::rule::ScheduleRule;

pub const WEEK_DAYS: [&str; 7] = [
    "saturday",
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
];

const TIME_PATTERN: &str = r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Built-in weekly schedule rules, in evaluation order
pub fn builtin_schedule_rules() -> Vec<Box<dyn ScheduleRule>> {
    vec![
        Box::new(ScheduleShapeRule),
        Box::new(CircleScheduleRule),
        Box::new(ScheduleSlotsRule),
        Box::new(ScheduleConflictsRule),
        Box::new(PackageLimitRule)
    ]
}

/// Minutes since midnight for an `H:MM` / `HH:MM` string already checked against `TIME_PATTERN`
fn minutes_of_day(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    Some(hours.parse::<u32>().ok()? * 60 + minutes.parse::<u32>().ok()?)
}

fn weekday_of(day: &str) -> Option<Weekday> {
    match day {
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        _ => None,
    }
}

/// Sessions, recurrence pattern and start date must all be present
pub struct ScheduleShapeRule;

impl ScheduleRule for ScheduleShapeRule {
    fn name(&self) -> &'static str {
        "schedule_shape"
    }

    fn description(&self) -> &'static str {
        "Weekly schedule must list sessions, a recurrence pattern and a start date"
    }

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        _subscription: Option<&SubscriptionWindow>,
        _config: &RulesConfig
    ) -> Outcome {
        if schedule.sessions.is_empty() {
            return Outcome::error("Session times must be specified");
        }

        let has_pattern = schedule.pattern
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false);
        if !has_pattern {
            return Outcome::error("A recurrence pattern must be specified");
        }

        if schedule.start_date.is_none() {
            return Outcome::error("A start date must be specified");
        }

        Outcome::success()
    }
}

/// A circle schedule needs an active circle with enough students enrolled
pub struct CircleScheduleRule;

impl ScheduleRule for CircleScheduleRule {
    fn name(&self) -> &'static str {
        "circle_schedule"
    }

    fn description(&self) -> &'static str {
        "Circle must be active and have at least its minimum number of students"
    }

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        _subscription: Option<&SubscriptionWindow>,
        _config: &RulesConfig
    ) -> Outcome {
        let circle = match &schedule.circle {
            Some(c) => c,
            None => {
                return Outcome::success();
            }
        };

        if !circle.active {
            return Outcome::error("The circle is not active");
        }

        if circle.enrolled_students < circle.min_students_to_start {
            let mut payload = Payload::new();
            payload.insert("enrolledStudents".to_string(), json!(circle.enrolled_students));
            payload.insert("minStudentsToStart".to_string(), json!(circle.min_students_to_start));
            return Outcome::error_with(
                format!(
                    "Enrolled students ({}) are fewer than the minimum ({})",
                    circle.enrolled_students,
                    circle.min_students_to_start
                ),
                payload
            );
        }

        Outcome::success()
    }
}

/// Each weekly slot needs a valid day, time and duration.
/// Slots on the same day must not overlap.
pub struct ScheduleSlotsRule;

impl ScheduleSlotsRule {
    fn check_slot(slot: &WeeklySlot, time_re: &Regex, config: &RulesConfig) -> Option<Outcome> {
        let day = slot.day.trim().to_lowercase();
        if !WEEK_DAYS.contains(&day.as_str()) {
            let mut payload = Payload::new();
            payload.insert("day".to_string(), json!(slot.day));
            return Some(Outcome::error_with(format!("Invalid day: {}", slot.day), payload));
        }

        if !time_re.is_match(slot.time.trim()) {
            let mut payload = Payload::new();
            payload.insert("time".to_string(), json!(slot.time));
            return Some(Outcome::error_with(format!("Invalid time: {}", slot.time), payload));
        }

        if let Some(duration) = slot.duration_minutes {
            let bounds = config.min_duration_minutes..=config.max_duration_minutes;
            if !bounds.contains(&duration) {
                let mut payload = Payload::new();
                payload.insert("durationMinutes".to_string(), json!(duration));
                payload.insert("min".to_string(), json!(config.min_duration_minutes));
                payload.insert("max".to_string(), json!(config.max_duration_minutes));
                return Some(
                    Outcome::error_with(
                        format!(
                            "Session duration on {} at {} must be between {} and {} minutes",
                            day,
                            slot.time,
                            config.min_duration_minutes,
                            config.max_duration_minutes
                        ),
                        payload
                    )
                );
            }
        }

        None
    }
}

impl ScheduleRule for ScheduleSlotsRule {
    fn name(&self) -> &'static str {
        "schedule_slots"
    }

    fn description(&self) -> &'static str {
        "Weekly slots must use valid days, HH:MM times and allowed durations without overlapping"
    }

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        _subscription: Option<&SubscriptionWindow>,
        config: &RulesConfig
    ) -> Outcome {
        let time_re = match Regex::new(TIME_PATTERN) {
            Ok(r) => r,
            Err(e) => {
                return Outcome::error(format!("Time pattern unavailable: {}", e));
            }
        };

        // (day, start minute, end minute, original time)
        let mut spans: Vec<(String, u32, u32, &str)> = Vec::with_capacity(schedule.sessions.len());

        for slot in &schedule.sessions {
            if let Some(outcome) = Self::check_slot(slot, &time_re, config) {
                return outcome;
            }

            let start = match minutes_of_day(slot.time.trim()) {
                Some(m) => m,
                None => {
                    return Outcome::error(format!("Invalid time: {}", slot.time));
                }
            };
            let duration = slot.duration_minutes.unwrap_or(config.default_duration_minutes);
            let end = start.saturating_add(duration);
            let day = slot.day.trim().to_lowercase();

            let clash = spans
                .iter()
                .find(|(d, s, e, _)| *d == day && *s < end && start < *e);
            if let Some((_, _, _, other)) = clash {
                let mut payload = Payload::new();
                payload.insert("day".to_string(), json!(day));
                payload.insert("time".to_string(), json!(slot.time));
                payload.insert("overlapsWith".to_string(), json!(other));
                return Outcome::error_with(
                    format!("Weekly slots overlap on {} at {}", day, slot.time),
                    payload
                );
            }

            spans.push((day, start, end, slot.time.as_str()));
        }

        Outcome::success()
    }
}

/// Weekly slots must not clash with the teacher's upcoming sessions on the same weekday
pub struct ScheduleConflictsRule;

impl ScheduleConflictsRule {
    fn clashes(slot: &SessionSlot, start: u32, end: u32) -> bool {
        let slot_start = slot.starts_at.hour() * 60 + slot.starts_at.minute();
        let slot_end = slot_start.saturating_add(slot.duration_minutes);
        slot_start < end && start < slot_end
    }
}

impl ScheduleRule for ScheduleConflictsRule {
    fn name(&self) -> &'static str {
        "schedule_conflicts"
    }

    fn description(&self) -> &'static str {
        "Weekly slots must not overlap the teacher's upcoming sessions"
    }

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        _subscription: Option<&SubscriptionWindow>,
        config: &RulesConfig
    ) -> Outcome {
        let now = schedule.now.unwrap_or_else(|| Local::now().naive_local());
        let upcoming: Vec<&SessionSlot> = schedule.existing
            .iter()
            .filter(|s| s.status != SessionStatus::Cancelled)
            .filter(|s| s.starts_at >= now)
            .collect();

        debug!(
            "Checking {} weekly slots against {} upcoming sessions",
            schedule.sessions.len(),
            upcoming.len()
        );

        for weekly in &schedule.sessions {
            let day = weekly.day.trim().to_lowercase();
            // Malformed slots are reported by schedule_slots
            let (weekday, start) = match (weekday_of(&day), minutes_of_day(weekly.time.trim())) {
                (Some(w), Some(m)) => (w, m),
                _ => {
                    continue;
                }
            };
            let end = start.saturating_add(
                weekly.duration_minutes.unwrap_or(config.default_duration_minutes)
            );

            let conflict = upcoming
                .iter()
                .find(|s| s.starts_at.weekday() == weekday && Self::clashes(s, start, end));
            if let Some(conflict) = conflict {
                let mut payload = Payload::new();
                payload.insert("conflictingSessionId".to_string(), json!(conflict.id));
                payload.insert(
                    "conflictingStartsAt".to_string(),
                    json!(conflict.starts_at.format(DATE_TIME_FORMAT).to_string())
                );
                return Outcome::error_with(
                    format!("Schedule conflict on {} at {}", day, weekly.time),
                    payload
                );
            }
        }

        Outcome::success()
    }
}

/// Weekly volume must fit the package's monthly allowance and sessions must remain
pub struct PackageLimitRule;

impl ScheduleRule for PackageLimitRule {
    fn name(&self) -> &'static str {
        "package_limit"
    }

    fn description(&self) -> &'static str {
        "Weekly sessions must fit the package limit and the subscription must have sessions left"
    }

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        subscription: Option<&SubscriptionWindow>,
        config: &RulesConfig
    ) -> Outcome {
        let subscription = match subscription {
            Some(s) => s,
            None => {
                return Outcome::success();
            }
        };

        let sessions_per_week = schedule.sessions.len() as u32;
        if let Some(limit) = subscription.sessions_per_month {
            let monthly = sessions_per_week.checked_mul(config.weeks_per_month);
            if monthly.map_or(true, |m| m > limit) {
                let mut payload = Payload::new();
                payload.insert("sessionsPerWeek".to_string(), json!(sessions_per_week));
                payload.insert("packageLimit".to_string(), json!(limit));
                return Outcome::error_with(
                    format!(
                        "Weekly session count ({}) exceeds the package limit ({} sessions per month)",
                        sessions_per_week,
                        limit
                    ),
                    payload
                );
            }
        }

        // Unknown remaining balance counts as exhausted
        match subscription.sessions_remaining {
            Some(remaining) if remaining > 0 => Outcome::success(),
            _ => Outcome::error("No sessions remaining in the subscription"),
        }
    }
}
