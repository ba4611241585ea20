use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{ RulesError, RulesResult };
use crate::implementations::config::RulesConfig;

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(RulesError::InvalidInput(format!("Unsupported output format: {}", s))),
        }
    }
}

/// Options for a single run of the rules system
pub struct RulesOptions {
    pub rules: RulesConfig,
    pub output_format: OutputFormat,
}

/// Read a YAML or JSON document, chosen by file extension (YAML unless `.json`)
pub fn load_document<T: DeserializeOwned>(path: &Path) -> RulesResult<T> {
    let contents = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&contents).map_err(|e| RulesError::ParseError {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    } else {
        serde_yaml::from_str(&contents).map_err(|e| RulesError::ParseError {
            format: "YAML".to_string(),
            message: e.to_string(),
        })
    }
}
