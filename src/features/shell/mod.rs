//! Shell integration: completion scripts.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions};
