pub mod config;
pub mod engine;
pub mod rules;
pub mod schedule_rules;
