use chrono::{ Local, NaiveDateTime };
use log::debug;
use serde_json::json;

use crate::implementations::config::RulesConfig;
use crate::models::outcome::{ Outcome, Payload };
use crate::models::schedule::{ SessionKind, SessionProposal, SessionSlot, SessionStatus };
use crate::traits::rule::Rule;

const DATE_FORMAT: &str = "%Y/%m/%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Built-in session rules, in evaluation order
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(StatusRule),
        Box::new(NotInPastRule),
        Box::new(DurationRule),
        Box::new(SubscriptionRule),
        Box::new(CourseRule),
        Box::new(OverlapRule)
    ]
}

fn payload<const N: usize>(entries: [(&str, serde_json::Value); N]) -> Payload {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Sessions in a final or running state cannot be moved
pub struct StatusRule;

impl Rule for StatusRule {
    fn name(&self) -> &'static str {
        "status"
    }

    fn description(&self) -> &'static str {
        "Only scheduled or ready sessions can be rescheduled"
    }

    fn evaluate(&self, proposal: &SessionProposal, _config: &RulesConfig) -> Outcome {
        let status = match proposal.status {
            Some(status) => status,
            None => {
                return Outcome::success();
            }
        };

        if status.is_final() {
            return Outcome::error_with(
                "Completed or cancelled sessions cannot be moved",
                payload([("status", json!(status))])
            );
        }

        if !status.can_reschedule() {
            return Outcome::error_with(
                "Sessions in this state cannot be rescheduled",
                payload([("status", json!(status))])
            );
        }

        Outcome::success()
    }
}

/// Proposals must not start before the reference time
pub struct NotInPastRule;

impl Rule for NotInPastRule {
    fn name(&self) -> &'static str {
        "not_in_past"
    }

    fn description(&self) -> &'static str {
        "Sessions cannot be scheduled in the past"
    }

    fn evaluate(&self, proposal: &SessionProposal, config: &RulesConfig) -> Outcome {
        if config.allow_past {
            return Outcome::success();
        }

        let now = proposal.now.unwrap_or_else(|| Local::now().naive_local());
        if proposal.starts_at < now {
            return Outcome::error_with(
                "Sessions cannot be scheduled in the past",
                payload([
                    ("now", json!(now.format(DATE_TIME_FORMAT).to_string())),
                    ("startsAt", json!(proposal.starts_at.format(DATE_TIME_FORMAT).to_string())),
                ])
            );
        }

        Outcome::success()
    }
}

/// Duration must lie within the configured bounds
pub struct DurationRule;

impl Rule for DurationRule {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn description(&self) -> &'static str {
        "Session duration must stay within the configured minimum and maximum"
    }

    fn evaluate(&self, proposal: &SessionProposal, config: &RulesConfig) -> Outcome {
        let duration = proposal.duration_or(config.default_duration_minutes);

        if duration < config.min_duration_minutes {
            return Outcome::error_with(
                format!("Minimum session duration is {} minutes", config.min_duration_minutes),
                payload([
                    ("durationMinutes", json!(duration)),
                    ("minDurationMinutes", json!(config.min_duration_minutes)),
                ])
            );
        }

        if duration > config.max_duration_minutes {
            return Outcome::error_with(
                format!("Maximum session duration is {} minutes", config.max_duration_minutes),
                payload([
                    ("durationMinutes", json!(duration)),
                    ("maxDurationMinutes", json!(config.max_duration_minutes)),
                ])
            );
        }

        Outcome::success()
    }
}

/// Individual and private sessions must fall inside an active subscription;
/// group sessions need an active circle
pub struct SubscriptionRule;

impl Rule for SubscriptionRule {
    fn name(&self) -> &'static str {
        "subscription"
    }

    fn description(&self) -> &'static str {
        "Session must fall within an active subscription or circle"
    }

    fn evaluate(&self, proposal: &SessionProposal, _config: &RulesConfig) -> Outcome {
        match proposal.kind {
            SessionKind::QuranIndividual | SessionKind::AcademicPrivate => {}
            SessionKind::QuranGroup => {
                if proposal.circle_active == Some(false) {
                    return Outcome::error("The circle is not active. The session cannot be moved.");
                }
                return Outcome::success();
            }
            SessionKind::QuranTrial | SessionKind::InteractiveCourse => {
                return Outcome::success();
            }
        }

        let subscription = match &proposal.subscription {
            Some(s) => s,
            None => {
                return Outcome::success();
            }
        };

        if !subscription.active {
            return Outcome::error("The subscription is not active. The session cannot be moved.");
        }

        if let Some(starts_at) = subscription.starts_at {
            if proposal.starts_at < starts_at {
                return Outcome::error_with(
                    format!(
                        "Sessions cannot be scheduled before the subscription start date ({})",
                        starts_at.format(DATE_FORMAT)
                    ),
                    payload([
                        ("subscriptionStartsAt", json!(starts_at.format(DATE_FORMAT).to_string())),
                    ])
                );
            }
        }

        if let Some(ends_at) = subscription.ends_at {
            if proposal.starts_at > ends_at {
                return Outcome::error_with(
                    format!(
                        "Sessions cannot be scheduled after the subscription end date ({})",
                        ends_at.format(DATE_FORMAT)
                    ),
                    payload([
                        ("subscriptionEndsAt", json!(ends_at.format(DATE_FORMAT).to_string())),
                    ])
                );
            }
        }

        Outcome::success()
    }
}

/// Interactive course sessions must stay inside a published course's dates
pub struct CourseRule;

impl Rule for CourseRule {
    fn name(&self) -> &'static str {
        "course"
    }

    fn description(&self) -> &'static str {
        "Course sessions must belong to a published course and stay within its dates"
    }

    fn evaluate(&self, proposal: &SessionProposal, _config: &RulesConfig) -> Outcome {
        if proposal.kind != SessionKind::InteractiveCourse {
            return Outcome::success();
        }

        let course = match &proposal.course {
            Some(c) => c,
            None => {
                return Outcome::success();
            }
        };

        if !course.published {
            return Outcome::error("The course is not published. The session cannot be moved.");
        }

        // Course bounds are whole days
        let day = proposal.starts_at.date();

        if let Some(start_date) = course.start_date {
            if day < start_date {
                return Outcome::error_with(
                    format!(
                        "Sessions cannot be scheduled before the course start date ({})",
                        start_date.format(DATE_FORMAT)
                    ),
                    payload([
                        ("courseStartDate", json!(start_date.format(DATE_FORMAT).to_string())),
                    ])
                );
            }
        }

        if let Some(end_date) = course.end_date {
            if day > end_date {
                return Outcome::error_with(
                    format!(
                        "Sessions cannot be scheduled after the course end date ({})",
                        end_date.format(DATE_FORMAT)
                    ),
                    payload([("courseEndDate", json!(end_date.format(DATE_FORMAT).to_string()))])
                );
            }
        }

        Outcome::success()
    }
}

/// The teacher must be free for the whole slot; near misses are flagged
pub struct OverlapRule;

/// Closest neighbour inside the proximity window
struct Neighbour<'a> {
    slot: &'a SessionSlot,
    gap_minutes: i64,
    before: bool,
}

impl OverlapRule {
    fn candidates<'a>(proposal: &'a SessionProposal) -> Vec<&'a SessionSlot> {
        let mut slots: Vec<&SessionSlot> = proposal.existing
            .iter()
            .filter(|s| s.teacher_id == proposal.teacher_id)
            .filter(|s| s.status != SessionStatus::Cancelled)
            .filter(|s| Some(s.id) != proposal.session_id)
            .collect();
        slots.sort_by_key(|s| (s.starts_at, s.id));
        slots
    }

    fn nearest<'a>(
        slots: &[&'a SessionSlot],
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        window: i64
    ) -> Option<Neighbour<'a>> {
        let mut nearest: Option<Neighbour<'a>> = None;

        for &slot in slots {
            let neighbour = if slot.ends_at() <= starts_at {
                Neighbour {
                    slot,
                    gap_minutes: (starts_at - slot.ends_at()).num_minutes(),
                    before: true,
                }
            } else if slot.starts_at >= ends_at {
                Neighbour {
                    slot,
                    gap_minutes: (slot.starts_at - ends_at).num_minutes(),
                    before: false,
                }
            } else {
                continue;
            };

            if neighbour.gap_minutes >= window {
                continue;
            }

            let closer = match &nearest {
                Some(current) => neighbour.gap_minutes < current.gap_minutes,
                None => true,
            };
            if closer {
                nearest = Some(neighbour);
            }
        }

        nearest
    }
}

impl Rule for OverlapRule {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn description(&self) -> &'static str {
        "Session must not overlap the teacher's other sessions"
    }

    fn evaluate(&self, proposal: &SessionProposal, config: &RulesConfig) -> Outcome {
        let duration = proposal.duration_or(config.default_duration_minutes);
        let starts_at = proposal.starts_at;
        let ends_at = proposal.ends_at(config.default_duration_minutes);
        let slots = Self::candidates(proposal);

        debug!(
            "Checking {} sessions of teacher {} for overlap",
            slots.len(),
            proposal.teacher_id
        );

        if let Some(conflict) = slots.iter().find(|s| s.overlaps(starts_at, duration)) {
            return Outcome::error_with(
                "Time slot overlaps existing session",
                payload([
                    ("conflictingSessionId", json!(conflict.id)),
                    (
                        "conflictingStartsAt",
                        json!(conflict.starts_at.format(DATE_TIME_FORMAT).to_string()),
                    ),
                ])
            );
        }

        let window = config.proximity_warning_minutes as i64;
        if let Some(neighbour) = Self::nearest(&slots, starts_at, ends_at, window) {
            let message = if neighbour.before {
                format!("Session starts {} minutes after previous ends", neighbour.gap_minutes)
            } else {
                format!("Session ends {} minutes before next starts", neighbour.gap_minutes)
            };
            return Outcome::warning_with(
                message,
                payload([
                    ("gapMinutes", json!(neighbour.gap_minutes)),
                    ("adjacentSessionId", json!(neighbour.slot.id)),
                ])
            );
        }

        Outcome::success()
    }
}
