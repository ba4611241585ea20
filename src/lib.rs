pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ load_document, OutputFormat, RulesOptions };
pub use errors::{ RulesError, RulesResult };
pub use implementations::config::{ ConfigError, RulesConfig };
pub use implementations::engine::RuleEngine;
pub use models::{
    outcome::{
        payload_from_value,
        Outcome,
        OutcomeError,
        Payload,
        Severity,
    },
    report::{
        OutcomeReport,
        RuleOutcome,
    },
    schedule::{
        CircleWindow,
        CourseWindow,
        SessionKind,
        SessionProposal,
        SessionSlot,
        SessionStatus,
        SubscriptionWindow,
        WeeklySchedule,
        WeeklySlot,
    },
};
pub use traits::{
    Rule,
    RuleInfo,
    RuleTarget,
    ScheduleRule,
};
