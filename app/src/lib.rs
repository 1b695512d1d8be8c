//! QuickCalc Session Host Library
//!
//! Configuration, session state and command handling around the engines.
//! Exposed as a library for the binary and integration tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod session;
