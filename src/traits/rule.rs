use crate::implementations::config::RulesConfig;
use crate::models::outcome::Outcome;
use crate::models::schedule::{ SessionProposal, SubscriptionWindow, WeeklySchedule };

/// A single check run against a session proposal
pub trait Rule: Send + Sync {
    /// Stable identifier, used in reports and in `disabled_rules`
    fn name(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Evaluate the proposal. Exactly one outcome per call.
    fn evaluate(&self, proposal: &SessionProposal, config: &RulesConfig) -> Outcome;
}

/// A single check run against a recurring weekly schedule
pub trait ScheduleRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn evaluate(
        &self,
        schedule: &WeeklySchedule,
        subscription: Option<&SubscriptionWindow>,
        config: &RulesConfig
    ) -> Outcome;
}

/// Name and description of a registered rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub target: RuleTarget,
}

/// What a rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Session,
    Schedule,
}
