use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value };
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Structured context attached to an outcome. Treated as opaque by this crate.
pub type Payload = HashMap<String, Value>;

/// Errors raised when an outcome is rebuilt from untrusted data
#[derive(Debug, Error, PartialEq)]
pub enum OutcomeError {
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    #[error("Inconsistent outcome: accepted={accepted} cannot carry severity {severity}")]
    InconsistentOutcome { accepted: bool, severity: Severity },

    #[error("Malformed outcome: {0}")]
    Malformed(String),
}

/// Classification of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error, // Blocking
    Warning, // Accepted, but the caller should surface a caution
    Info, // Plain success
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(OutcomeError::UnknownSeverity(s.to_string())),
        }
    }
}

/// Result of evaluating one rule.
///
/// Outcomes are immutable and can only be built through [`Outcome::success`],
/// [`Outcome::error`] and [`Outcome::warning`] (or their `_with` variants that
/// attach a payload). That keeps `accepted` and `severity` consistent: a
/// rejected outcome is always an error, and a warning is always accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome")]
pub struct Outcome {
    accepted: bool,
    message: String,
    severity: Severity,
    payload: Payload,
}

impl Outcome {
    /// A passing check with nothing to report
    pub fn success() -> Self {
        Self::success_with("", Payload::new())
    }

    pub fn success_with(message: impl Into<String>, payload: Payload) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            severity: Severity::Info,
            payload,
        }
    }

    /// A failing check; callers must treat it as blocking
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_with(message, Payload::new())
    }

    pub fn error_with(message: impl Into<String>, payload: Payload) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            severity: Severity::Error,
            payload,
        }
    }

    /// A passing check that still deserves a caution
    pub fn warning(message: impl Into<String>) -> Self {
        Self::warning_with(message, Payload::new())
    }

    pub fn warning_with(message: impl Into<String>, payload: Payload) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            severity: Severity::Warning,
            payload,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Serialized form for API responses:
    /// `{"accepted", "message", "severity", "payload"}`
    pub fn to_json(&self) -> Value {
        json!({
            "accepted": self.accepted,
            "message": self.message,
            "severity": self.severity.as_str(),
            "payload": self.payload,
        })
    }

    /// Rebuild an outcome from its serialized form
    pub fn from_json(value: Value) -> Result<Self, OutcomeError> {
        let raw: RawOutcome = serde_json::from_value(value)
            .map_err(|e| OutcomeError::Malformed(e.to_string()))?;
        Outcome::try_from(raw)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "[{}]", self.severity)
        } else {
            write!(f, "[{}] {}", self.severity, self.message)
        }
    }
}

/// Wire shape accepted on deserialization, checked before it becomes an `Outcome`
#[derive(Deserialize)]
struct RawOutcome {
    accepted: bool,
    #[serde(default)]
    message: String,
    severity: Severity,
    #[serde(default)]
    payload: Option<Payload>,
}

impl TryFrom<RawOutcome> for Outcome {
    type Error = OutcomeError;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        let payload = raw.payload.unwrap_or_default();
        match (raw.accepted, raw.severity) {
            (true, Severity::Info) => Ok(Outcome::success_with(raw.message, payload)),
            (true, Severity::Warning) => Ok(Outcome::warning_with(raw.message, payload)),
            (false, Severity::Error) => Ok(Outcome::error_with(raw.message, payload)),
            (accepted, severity) => Err(OutcomeError::InconsistentOutcome { accepted, severity }),
        }
    }
}

/// Turn a JSON object into a payload
pub fn payload_from_value(value: Value) -> Result<Payload, OutcomeError> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(Payload::new()),
        other => Err(OutcomeError::Malformed(format!("payload must be an object, got {}", other))),
    }
}
