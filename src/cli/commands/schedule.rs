use anyhow::{ anyhow, Result };
use log::info;
use std::path::Path;

use crate::cli::ui;
use session_rules::{ load_document, OutputFormat, RuleEngine, SubscriptionWindow, WeeklySchedule };

/// Weekly schedule check command. Returns whether the schedule was accepted.
pub fn execute(
    engine: &RuleEngine,
    schedule_path: &Path,
    subscription_path: Option<&Path>,
    format: OutputFormat
) -> Result<bool> {
    info!("Loading weekly schedule from {}", schedule_path.display());
    let schedule: WeeklySchedule = load_document(schedule_path).map_err(|e|
        anyhow!("Failed to load schedule {}: {}", schedule_path.display(), e)
    )?;

    let subscription: Option<SubscriptionWindow> = match subscription_path {
        Some(path) => {
            info!("Loading subscription from {}", path.display());
            Some(
                load_document(path).map_err(|e|
                    anyhow!("Failed to load subscription {}: {}", path.display(), e)
                )?
            )
        }
        None => None,
    };

    let report = engine.evaluate_schedule(&schedule, subscription.as_ref());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
        OutputFormat::Text => {
            ui::print_header("Weekly Schedule Check");
            ui::print_info(&format!("{} weekly slot(s)", schedule.sessions.len()));
            if subscription.is_none() {
                ui::print_warning("No subscription given, package limits are not checked.");
            }
            ui::print_report(&report);
        }
    }

    Ok(!report.is_blocked())
}
