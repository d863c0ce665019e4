//! Interactive partner subscription samples.
//!
//! Re-exports the scenario building blocks (console, context, runner and
//! the scenarios themselves) for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod runner;
pub mod scenarios;
