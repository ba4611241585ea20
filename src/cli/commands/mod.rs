pub mod check;
pub mod outcome;
pub mod rules;
pub mod schedule;
