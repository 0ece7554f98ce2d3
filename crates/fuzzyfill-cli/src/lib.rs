//! Command-line front end for the fuzzyfill engines.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
