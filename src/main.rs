use anyhow::Result;
use clap::Parser;
use log::{ debug, info };
use std::process::ExitCode;

use session_rules::{ OutputFormat, RuleEngine, RulesConfig, RulesOptions };

mod cli;
use cli::{ Commands, SessionRulesCli };

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            cli::ui::print_error(&format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}

/// Returns whether the evaluated input was accepted
fn run() -> Result<bool> {
    // Parse the command line arguments
    let cli = SessionRulesCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    // Pick up overrides from a local .env file, if any
    if dotenv::dotenv().is_ok() {
        debug!("Loaded environment variables from .env file");
    }

    let options = RulesOptions {
        rules: RulesConfig::load(cli.config.as_deref())?,
        output_format: cli.output_format.parse::<OutputFormat>()?,
    };
    let engine = RuleEngine::from_config(options.rules)?;

    // Handle commands
    match &cli.command {
        Commands::Check { proposal } => {
            cli::commands::check::execute(&engine, proposal, options.output_format)
        }

        Commands::Schedule { schedule, subscription } => {
            cli::commands::schedule::execute(
                &engine,
                schedule,
                subscription.as_deref(),
                options.output_format
            )
        }

        Commands::Rules => {
            cli::commands::rules::execute(&engine, options.output_format)?;
            Ok(true)
        }

        Commands::Outcome { kind, message, payload } => {
            cli::commands::outcome::execute(
                kind,
                message,
                payload.as_deref(),
                options.output_format
            )?;
            Ok(true)
        }
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
