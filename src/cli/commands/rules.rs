use anyhow::Result;
use serde_json::json;

use crate::cli::ui;
use session_rules::{ OutputFormat, RuleEngine };

/// List registered rules
pub fn execute(engine: &RuleEngine, format: OutputFormat) -> Result<()> {
    let rules = engine.rule_names();

    match format {
        OutputFormat::Json => {
            let listing: Vec<_> = rules
                .iter()
                .map(|r| {
                    json!({
                        "name": r.name,
                        "description": r.description,
                        "target": format!("{:?}", r.target).to_lowercase(),
                        "enabled": !engine.config().is_rule_disabled(r.name),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Text => {
            ui::print_header("Built-in Rules");
            ui::print_rules(&rules);
            for name in &engine.config().disabled_rules {
                ui::print_warning(&format!("Rule {} is disabled by configuration", name));
            }
        }
    }

    Ok(())
}
