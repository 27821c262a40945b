//! CLI commands

pub mod check;
pub mod hook;
pub mod rules;
pub mod validate;
