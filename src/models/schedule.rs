use chrono::{ Duration, NaiveDate, NaiveDateTime };
use serde::{ Deserialize, Serialize };

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Ready,
    Ongoing,
    Completed,
    Cancelled,
    Absent,
}

impl SessionStatus {
    /// Completed, cancelled and absent sessions are closed for good
    pub fn is_final(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Absent)
    }

    pub fn can_reschedule(&self) -> bool {
        matches!(self, SessionStatus::Scheduled | SessionStatus::Ready)
    }
}

/// Kind of session placed on a teacher's calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    QuranIndividual,
    QuranGroup,
    QuranTrial,
    AcademicPrivate,
    InteractiveCourse,
}

/// A session already on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSlot {
    pub id: u64,
    pub teacher_id: u64,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub status: SessionStatus,
}

impl SessionSlot {
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(self.duration_minutes as i64)
    }

    /// Half-open interval overlap: touching slots do not overlap
    pub fn overlaps(&self, starts_at: NaiveDateTime, duration_minutes: u32) -> bool {
        let ends_at = starts_at + Duration::minutes(duration_minutes as i64);
        self.starts_at < ends_at && starts_at < self.ends_at()
    }
}

/// Dates and allowance of the subscription a session belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionWindow {
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub sessions_remaining: Option<u32>,
    #[serde(default)]
    pub sessions_per_month: Option<u32>,
}

/// Publication state and date range of an interactive course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWindow {
    pub published: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A requested placement of a session, with the calendar state it is checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProposal {
    /// Id of the session being moved, absent for a new session
    #[serde(default)]
    pub session_id: Option<u64>,
    pub kind: SessionKind,
    pub teacher_id: u64,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Reference time for past checks; the local clock when absent
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    #[serde(default)]
    pub existing: Vec<SessionSlot>,
    #[serde(default)]
    pub subscription: Option<SubscriptionWindow>,
    #[serde(default)]
    pub course: Option<CourseWindow>,
    #[serde(default)]
    pub circle_active: Option<bool>,
}

impl SessionProposal {
    pub fn duration_or(&self, default_minutes: u32) -> u32 {
        self.duration_minutes.unwrap_or(default_minutes)
    }

    pub fn ends_at(&self, default_minutes: u32) -> NaiveDateTime {
        self.starts_at + Duration::minutes(self.duration_or(default_minutes) as i64)
    }
}

/// Status and enrolment of the group circle a weekly schedule is created for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleWindow {
    pub active: bool,
    #[serde(default)]
    pub enrolled_students: u32,
    #[serde(default)]
    pub min_students_to_start: u32,
}

/// One recurring weekly slot, as entered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub day: String,
    pub time: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

/// Recurring schedule submitted for a subscription or circle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub sessions: Vec<WeeklySlot>,
    /// Reference time; existing sessions before it are ignored. The local clock when absent
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// Sessions already on the teacher's calendar
    #[serde(default)]
    pub existing: Vec<SessionSlot>,
    #[serde(default)]
    pub circle: Option<CircleWindow>,
}
