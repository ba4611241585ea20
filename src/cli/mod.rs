use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "session-rules",
    about = "Checks academy session placements and weekly schedules",
    version,
    author,
    long_about = None
)]
pub struct SessionRulesCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a proposed session placement against the calendar
    Check {
        /// Path to the proposal file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        proposal: PathBuf,
    },

    /// Check a recurring weekly schedule
    Schedule {
        /// Path to the weekly schedule file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Subscription the schedule is created for
        #[arg(long)]
        subscription: Option<PathBuf>,
    },

    /// List the built-in rules
    Rules,

    /// Build a single outcome and print its serialized form
    Outcome {
        /// Outcome kind (success, error, warning)
        #[arg(short, long, default_value = "success")]
        kind: String,

        /// Message carried by the outcome
        #[arg(short, long, default_value = "")]
        message: String,

        /// Payload as a JSON object
        #[arg(short, long)]
        payload: Option<String>,
    },
}
