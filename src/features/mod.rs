//! Feature implementations for boxbreath.
//!
//! - Breathing sessions (driver, timing, pacer, audio)
//! - Shell integration

pub mod breath;
pub mod shell;
