use anyhow::{ anyhow, Result };

use crate::cli::ui;
use session_rules::{ payload_from_value, Outcome, OutputFormat, Payload };

/// Build one outcome from command-line input and print it
pub fn execute(
    kind: &str,
    message: &str,
    payload: Option<&str>,
    format: OutputFormat
) -> Result<()> {
    let payload = match payload {
        Some(raw) => {
            let value: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| anyhow!("Payload is not valid JSON: {}", e))?;
            payload_from_value(value)?
        }
        None => Payload::new(),
    };

    let outcome = build_outcome(kind, message, payload)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
        }
        OutputFormat::Text => {
            ui::print_result("Accepted", &outcome.is_accepted().to_string());
            ui::print_result("Severity", outcome.severity().as_str());
            ui::print_outcome(kind, &outcome);
        }
    }

    Ok(())
}

fn build_outcome(kind: &str, message: &str, payload: Payload) -> Result<Outcome> {
    match kind.to_lowercase().as_str() {
        "success" | "info" => Ok(Outcome::success_with(message, payload)),
        "error" => Ok(Outcome::error_with(message, payload)),
        "warning" | "warn" => Ok(Outcome::warning_with(message, payload)),
        _ => Err(anyhow!("Unsupported outcome kind: {}", kind)),
    }
}
