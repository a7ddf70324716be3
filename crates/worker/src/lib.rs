//! Headless batch runner for the La Paris studio.
//!
//! Loads branding and endpoint settings from the environment, queues the
//! given files, processes them all concurrently and exports the results.

pub mod config;
pub mod run;
