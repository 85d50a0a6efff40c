//! Command-line interface: argument model and command handlers.

pub mod args;
pub mod commands;
