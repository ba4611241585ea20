use anyhow::{ anyhow, Result };
use log::info;
use std::path::Path;

use crate::cli::ui;
use session_rules::{ load_document, OutputFormat, RuleEngine, SessionProposal };

/// Session proposal check command. Returns whether the proposal was accepted.
pub fn execute(engine: &RuleEngine, proposal_path: &Path, format: OutputFormat) -> Result<bool> {
    info!("Loading proposal from {}", proposal_path.display());
    let proposal: SessionProposal = load_document(proposal_path).map_err(|e|
        anyhow!("Failed to load proposal {}: {}", proposal_path.display(), e)
    )?;

    let report = engine.evaluate(&proposal);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
        OutputFormat::Text => {
            ui::print_header("Session Check");
            ui::print_info(
                &format!(
                    "{:?} session for teacher {} at {}",
                    proposal.kind,
                    proposal.teacher_id,
                    proposal.starts_at.format("%Y-%m-%d %H:%M")
                )
            );
            ui::print_report(&report);
        }
    }

    Ok(!report.is_blocked())
}
