use serde::Serialize;
use serde_json::{ json, Value };

use crate::models::outcome::{ Outcome, Payload };

/// One rule's outcome within a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome {
    pub rule: String,
    pub outcome: Outcome,
}

impl RuleOutcome {
    pub fn to_json(&self) -> Value {
        let mut value = self.outcome.to_json();
        if let Value::Object(map) = &mut value {
            map.insert("rule".to_string(), Value::String(self.rule.clone()));
        }
        value
    }
}

/// Ordered outcomes of one evaluation.
///
/// The report separates hard stops from advisory notices: it is blocked as
/// soon as one outcome is an error, while warnings are carried along for the
/// caller to surface without blocking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeReport {
    entries: Vec<RuleOutcome>,
}

impl OutcomeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: impl Into<String>, outcome: Outcome) {
        self.entries.push(RuleOutcome {
            rule: rule.into(),
            outcome,
        });
    }

    pub fn entries(&self) -> &[RuleOutcome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one outcome is an error
    pub fn is_blocked(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_error())
    }

    /// True when nothing was reported beyond plain successes
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| !e.outcome.is_error() && !e.outcome.is_warning())
    }

    pub fn errors(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.entries.iter().filter(|e| e.outcome.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.entries.iter().filter(|e| e.outcome.is_warning())
    }

    pub fn first_error(&self) -> Option<&RuleOutcome> {
        self.errors().next()
    }

    /// Collapse the report into a single outcome.
    ///
    /// The first error wins. Otherwise all warnings are merged into one
    /// warning, with the individual entries kept under `payload.warnings`.
    pub fn into_outcome(self) -> Outcome {
        if let Some(entry) = self.first_error() {
            return entry.outcome.clone();
        }

        let warnings: Vec<&RuleOutcome> = self.warnings().collect();
        if warnings.is_empty() {
            return Outcome::success();
        }

        let message = warnings
            .iter()
            .map(|w| w.outcome.message())
            .filter(|m| !m.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        let mut payload = Payload::new();
        payload.insert(
            "warnings".to_string(),
            Value::Array(warnings.iter().map(|w| w.to_json()).collect())
        );

        Outcome::warning_with(message, payload)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "blocked": self.is_blocked(),
            "outcomes": self.entries.iter().map(|e| e.to_json()).collect::<Vec<_>>(),
        })
    }
}
