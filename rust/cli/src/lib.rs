//! # Blackjack CLI Library
//!
//! Command-line front end for the blackjack engine: an interactive `play`
//! session, `cfg` to inspect configuration, and `shuffle` to preview a seeded
//! deck.
//!
//! The entry point is [`run`], which parses arguments, resolves
//! configuration, dispatches to a subcommand and returns the process exit
//! code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["blackjack", "play", "--seed", "42"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{handle_cfg_command, handle_play_command, handle_shuffle_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// `play` reads its commands from the process stdin.
///
/// # Returns
///
/// [`exit_code::SUCCESS`] on success, [`exit_code::ERROR`] for argument,
/// configuration or I/O failures.
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "shuffle", "--seed", "42"];
/// let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn std::io::BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // help and version go to stdout with success
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
    };

    tracing::debug!(command = cli.cmd.name(), "dispatching");
    let result = dispatch(cli.cmd, out, err, stdin);
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(
    cmd: Commands,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn std::io::BufRead,
) -> Result<(), CliError> {
    match cmd {
        Commands::Play { seed, history } => {
            let resolved = config::load_with_sources()?.with_overrides(seed, history);
            let cfg = resolved.config;
            handle_play_command(cfg.seed, cfg.history, out, err, stdin)
        }
        Commands::Cfg => {
            let resolved = config::load_with_sources()?;
            handle_cfg_command(&resolved, out)
        }
        Commands::Shuffle { seed } => {
            let seed = match seed {
                Some(s) => Some(s),
                None => config::load_with_sources()?.config.seed,
            };
            handle_shuffle_command(seed, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_args(args: &[&str], input: &str) -> (i32, String, String) {
        let _guard = config::env_lock();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let code = run_with_input(args.iter().copied(), &mut out, &mut err, &mut stdin);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout_with_success() {
        let (code, out, _) = run_args(&["blackjack", "--help"], "");
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("play"));
        assert!(out.contains("shuffle"));
    }

    #[test]
    fn unknown_subcommand_is_an_error() {
        let (code, out, err) = run_args(&["blackjack", "split"], "");
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        let (code, _, _) = run_args(&["blackjack"], "");
        assert_eq!(code, exit_code::ERROR);
    }

    #[test]
    fn play_dispatch_uses_seed_flag() {
        let (code, out, _) = run_args(&["blackjack", "play", "--seed", "5"], "q\n");
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("seed=5"));
    }

    #[test]
    fn shuffle_dispatch() {
        let (code, out, _) = run_args(&["blackjack", "shuffle", "--seed", "3"], "");
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.starts_with("seed=3"));
    }

    #[test]
    fn cfg_dispatch_prints_json() {
        let (code, out, _) = run_args(&["blackjack", "cfg"], "");
        assert_eq!(code, exit_code::SUCCESS);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(json.get("seed").is_some());
        assert!(json.get("history").is_some());
    }

    #[test]
    fn broken_config_maps_to_error_exit() {
        let _guard = config::env_lock();
        // SAFETY: env_lock serializes every test that touches the environment.
        unsafe {
            std::env::set_var(config::SEED_ENV, "not-a-number");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let code = run_with_input(["blackjack", "cfg"], &mut out, &mut err, &mut stdin);
        unsafe {
            std::env::remove_var(config::SEED_ENV);
        }
        assert_eq!(code, exit_code::ERROR);
        assert!(String::from_utf8(err).unwrap().contains("Invalid seed"));
    }
}
