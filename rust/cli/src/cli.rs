//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level parser for the `blackjack` binary.
#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Single-player blackjack against the house"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Play an interactive session, reading commands from stdin
    Play {
        /// Seed for the shuffle source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Append every finished round to this JSONL file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a freshly shuffled deck, top card first
    Shuffle {
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Cfg => "cfg",
            Commands::Shuffle { .. } => "shuffle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_flags() {
        let cli = BlackjackCli::try_parse_from([
            "blackjack",
            "play",
            "--seed",
            "7",
            "--history",
            "rounds.jsonl",
        ])
        .unwrap();
        assert_eq!(
            cli.cmd,
            Commands::Play {
                seed: Some(7),
                history: Some(PathBuf::from("rounds.jsonl")),
            }
        );
    }

    #[test]
    fn parses_bare_subcommands() {
        let cli = BlackjackCli::try_parse_from(["blackjack", "cfg"]).unwrap();
        assert_eq!(cli.cmd, Commands::Cfg);
        let cli = BlackjackCli::try_parse_from(["blackjack", "shuffle"]).unwrap();
        assert_eq!(cli.cmd, Commands::Shuffle { seed: None });
        assert_eq!(cli.cmd.name(), "shuffle");
    }

    #[test]
    fn rejects_non_numeric_seed() {
        assert!(BlackjackCli::try_parse_from(["blackjack", "play", "--seed", "abc"]).is_err());
    }
}
