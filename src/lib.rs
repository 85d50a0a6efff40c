//! boxbreath - Guided box breathing in the terminal
//!
//! A session walks a pacer around a square, one side per phase of the
//! inhale / hold / exhale / hold cycle, with optional audio cues and
//! background music.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreathError;
pub use features::breath::SessionDriver;
