mod outcome_tests;
mod schedule_rules_tests;

use chrono::{ NaiveDate, NaiveDateTime };
use log::info;

use crate::models::schedule::{ SessionKind, SessionProposal, SessionSlot, SessionStatus };

// Initialize logging once per test binary
pub(crate) fn setup() {
    if env_logger::builder().is_test(true).try_init().is_ok() {
        info!("Logger initialized");
    }
}

pub(crate) fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}

pub(crate) fn slot(id: u64, starts_at: NaiveDateTime, duration_minutes: u32) -> SessionSlot {
    SessionSlot {
        id,
        teacher_id: 7,
        starts_at,
        duration_minutes,
        status: SessionStatus::Scheduled,
    }
}

/// A 60 minute private session for teacher 7 on the 20th at 10:00, checked at 08:00 that day
pub(crate) fn proposal() -> SessionProposal {
    SessionProposal {
        session_id: None,
        kind: SessionKind::AcademicPrivate,
        teacher_id: 7,
        status: None,
        starts_at: at(20, 10, 0),
        duration_minutes: Some(60),
        now: Some(at(20, 8, 0)),
        existing: Vec::new(),
        subscription: None,
        course: None,
        circle_active: None,
    }
}
