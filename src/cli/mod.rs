//! Command-line interface for the `gsearch` binary.

pub mod commands;
