//! CLI module for respnorm - command-line interface and subcommands.
//!
//! Provides the entry point for replaying recorded chunk streams and
//! printing serialized responses.

pub mod commands;

pub use commands::Cli;
