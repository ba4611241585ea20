use log::{ debug, info, warn };

use crate::errors::{ RulesError, RulesResult };
use crate::implementations::config::RulesConfig;
use crate::implementations::rules::builtin_rules;
use crate::implementations::schedule_rules::builtin_schedule_rules;
use crate::models::outcome::Outcome;
use crate::models::report::OutcomeReport;
use crate::models::schedule::{ SessionProposal, SubscriptionWindow, WeeklySchedule };
use crate::traits::rule::{ Rule, RuleInfo, RuleTarget, ScheduleRule };

/// Runs an ordered set of rules and collects their outcomes into a report
pub struct RuleEngine {
    config: RulesConfig,
    rules: Vec<Box<dyn Rule>>,
    schedule_rules: Vec<Box<dyn ScheduleRule>>,
}

impl RuleEngine {
    /// Engine with every built-in rule registered
    pub fn new(config: RulesConfig) -> Self {
        Self::with_rules(config, builtin_rules(), builtin_schedule_rules())
    }

    /// Engine with the built-in rules, rejecting unknown names in `disabled_rules`
    pub fn from_config(config: RulesConfig) -> RulesResult<Self> {
        let engine = Self::new(config);
        engine.validate_rule_names(&engine.config.disabled_rules)?;
        Ok(engine)
    }

    pub fn with_rules(
        config: RulesConfig,
        rules: Vec<Box<dyn Rule>>,
        schedule_rules: Vec<Box<dyn ScheduleRule>>
    ) -> Self {
        Self { config, rules, schedule_rules }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Evaluate a session proposal against every enabled session rule
    pub fn evaluate(&self, proposal: &SessionProposal) -> OutcomeReport {
        info!(
            "Evaluating {:?} proposal for teacher {} at {}",
            proposal.kind,
            proposal.teacher_id,
            proposal.starts_at
        );

        let mut report = OutcomeReport::new();
        for rule in &self.rules {
            if self.config.is_rule_disabled(rule.name()) {
                debug!("Skipping disabled rule {}", rule.name());
                continue;
            }
            let outcome = rule.evaluate(proposal, &self.config);
            log_outcome(rule.name(), &outcome);
            report.push(rule.name(), outcome);
        }

        summarize(&report);
        report
    }

    /// Evaluate a weekly schedule against every enabled schedule rule
    pub fn evaluate_schedule(
        &self,
        schedule: &WeeklySchedule,
        subscription: Option<&SubscriptionWindow>
    ) -> OutcomeReport {
        info!("Evaluating weekly schedule with {} slots", schedule.sessions.len());

        let mut report = OutcomeReport::new();
        for rule in &self.schedule_rules {
            if self.config.is_rule_disabled(rule.name()) {
                debug!("Skipping disabled rule {}", rule.name());
                continue;
            }
            let outcome = rule.evaluate(schedule, subscription, &self.config);
            log_outcome(rule.name(), &outcome);
            report.push(rule.name(), outcome);
        }

        summarize(&report);
        report
    }

    /// Registered rules, session rules first
    pub fn rule_names(&self) -> Vec<RuleInfo> {
        let session = self.rules.iter().map(|r| RuleInfo {
            name: r.name(),
            description: r.description(),
            target: RuleTarget::Session,
        });
        let schedule = self.schedule_rules.iter().map(|r| RuleInfo {
            name: r.name(),
            description: r.description(),
            target: RuleTarget::Schedule,
        });
        session.chain(schedule).collect()
    }

    /// Fail on names that match no registered rule
    pub fn validate_rule_names(&self, names: &[String]) -> RulesResult<()> {
        let known = self.rule_names();
        for name in names {
            if !known.iter().any(|info| info.name == name.as_str()) {
                return Err(RulesError::UnknownRule(name.clone()));
            }
        }
        Ok(())
    }
}

fn log_outcome(rule: &str, outcome: &Outcome) {
    if outcome.is_error() {
        debug!("Rule {} rejected: {}", rule, outcome.message());
    } else if outcome.is_warning() {
        debug!("Rule {} accepted with warning: {}", rule, outcome.message());
    } else {
        debug!("Rule {} passed", rule);
    }
}

fn summarize(report: &OutcomeReport) {
    let errors = report.errors().count();
    let warnings = report.warnings().count();
    if errors > 0 {
        warn!("Evaluation blocked: {} error(s), {} warning(s)", errors, warnings);
    } else {
        info!("Evaluation passed: {} rule(s), {} warning(s)", report.len(), warnings);
    }
}
