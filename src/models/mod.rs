pub mod outcome;
pub mod report;
pub mod schedule;

// Re-export common model types
pub use outcome::{ Outcome, OutcomeError, Payload, Severity };
pub use report::{ OutcomeReport, RuleOutcome };
pub use schedule::{
    CircleWindow,
    CourseWindow,
    SessionKind,
    SessionProposal,
    SessionSlot,
    SessionStatus,
    SubscriptionWindow,
    WeeklySchedule,
    WeeklySlot,
};
