pub mod rule;

// Re-export traits
pub use rule::{ Rule, RuleInfo, RuleTarget, ScheduleRule };
