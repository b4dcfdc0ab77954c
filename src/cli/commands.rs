//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - replay: stream a JSONL chunk file through the normalizer
//! - serialize: print the JSON form of a response

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// respnorm - replay and inspect normalized model responses
#[derive(Parser, Debug)]
#[command(name = "respnorm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream a JSONL file of raw chunks and print each update
    Replay {
        /// JSONL file, one chunk per line
        file: PathBuf,

        /// Print only the final update
        #[arg(short, long)]
        final_only: bool,
    },

    /// Print the serialized response
    Serialize {
        /// JSONL chunk file to resolve
        #[arg(conflicts_with = "text", required_unless_present = "text")]
        file: Option<PathBuf>,

        /// Use this text instead of a chunk file
        #[arg(short, long)]
        text: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["respnorm"]).is_err());
    }

    #[test]
    fn test_cli_replay() {
        let cli = Cli::try_parse_from(["respnorm", "replay", "chunks.jsonl"]).unwrap();
        match cli.command {
            Commands::Replay { file, final_only } => {
                assert_eq!(file, PathBuf::from("chunks.jsonl"));
                assert!(!final_only);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_replay_final_only() {
        let cli = Cli::try_parse_from(["respnorm", "replay", "-f", "chunks.jsonl"]).unwrap();
        assert!(matches!(cli.command, Commands::Replay { final_only: true, .. }));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["respnorm", "replay", "x.jsonl", "-v", "-c", "/tmp/respnorm.yml"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/respnorm.yml")));
    }

    #[test]
    fn test_cli_serialize_with_text() {
        let cli = Cli::try_parse_from(["respnorm", "serialize", "--text", "hello"]).unwrap();
        match cli.command {
            Commands::Serialize { file, text } => {
                assert!(file.is_none());
                assert_eq!(text.as_deref(), Some("hello"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_serialize_needs_input() {
        assert!(Cli::try_parse_from(["respnorm", "serialize"]).is_err());
    }

    #[test]
    fn test_cli_serialize_file_and_text_conflict() {
        assert!(Cli::try_parse_from(["respnorm", "serialize", "a.jsonl", "--text", "b"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
