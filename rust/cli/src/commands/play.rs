//! # Play Command
//!
//! Interactive blackjack session. Commands are read one per line from stdin
//! (`bet N`, `deal`, `hit`, `stay`, `reset`, `status`, `help`, `q`) and the
//! table is printed after every accepted command. Rejected commands are
//! reported on stderr and leave the table as it was.
//!
//! When a history path is given, every finished round is appended to it as a
//! JSON line.

use crate::error::CliError;
use crate::formatters::format_snapshot;
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{HELP_TEXT, ParseResult, TableCommand, parse_table_command};
use blackjack_engine::engine::Engine;
use blackjack_engine::game::{Phase, RoundSnapshot};
use blackjack_engine::logger::RoundLogger;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

const PROMPT: &str = "Enter command (bet N/deal/hit/stay/status/help/q): ";

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - Seed for the shuffle source (random when `None`)
/// * `history` - JSONL file receiving one record per finished round
/// * `out` - Table display and prompts
/// * `err` - Rejected commands and warnings
/// * `stdin` - Player commands, one per line
///
/// # Errors
///
/// * `CliError::Io` if the history file cannot be opened or a stream fails
pub fn handle_play_command(
    seed: Option<u64>,
    history: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut logger = match &history {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    info!(seed, history = ?history, "session started");

    let mut eng = Engine::new(Some(seed));
    writeln!(out, "blackjack: seed={}", seed)?;
    writeln!(out, "{}", format_snapshot(&eng.snapshot()))?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin)? else {
            break;
        };
        let command = match parse_table_command(&input) {
            ParseResult::Command(command) => command,
            ParseResult::Help => {
                writeln!(out, "{}", HELP_TEXT)?;
                continue;
            }
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let was_playing = matches!(eng.phase(), Phase::AwaitingBet | Phase::PlayerTurn);
        match apply(&mut eng, command) {
            Ok(snap) => {
                writeln!(out, "{}", format_snapshot(&snap))?;
                if was_playing && snap.is_round_over() {
                    record_round(&eng, logger.as_mut(), err)?;
                    prompt_after_round(&snap, out)?;
                }
            }
            Err(e) => {
                debug!(?command, error = %e, "command rejected");
                ui::write_error(err, &e.to_string())?;
            }
        }
    }

    let snap = eng.snapshot();
    writeln!(
        out,
        "Rounds played: {}  Final money: {}",
        snap.round,
        snap.money + snap.current_bet
    )?;
    Ok(())
}

fn apply(
    eng: &mut Engine,
    command: TableCommand,
) -> Result<RoundSnapshot, blackjack_engine::errors::GameError> {
    match command {
        TableCommand::Bet(amount) => eng.place_bet(amount),
        TableCommand::Deal => eng.deal(),
        TableCommand::Hit => eng.hit(),
        TableCommand::Stay => eng.stay(),
        TableCommand::Reset => eng.reset_from_bankruptcy(),
        TableCommand::Status => Ok(eng.snapshot()),
    }
}

/// Appends the finished round to the history file. A failed write is
/// reported as a warning and play continues.
fn record_round(
    eng: &Engine,
    logger: Option<&mut RoundLogger>,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (Some(logger), Some(record)) = (logger, eng.round_record()) else {
        return Ok(());
    };
    if let Err(e) = logger.write(&record) {
        ui::display_warning(err, &format!("Failed to write round history: {}", e))?;
    }
    Ok(())
}

fn prompt_after_round(snap: &RoundSnapshot, out: &mut dyn Write) -> Result<(), CliError> {
    if snap.phase == Phase::Bankrupt {
        writeln!(out, "You are out of money. Type 'reset' to start over.")?;
    } else {
        writeln!(out, "Type 'deal' to clear the table.")?;
    }
    Ok(())
}
