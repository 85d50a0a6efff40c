//! Configuration management for boxbreath.
//!
//! This module handles loading and saving configuration from `~/.boxbreath/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{AudioConfig, Config, DisplayConfig, LoggingConfig, SessionDefaults};
