//! Parsing of the commands typed during a `play` session.
//!
//! Parsing only checks shape. Whether a command is allowed right now (for
//! example a bet during the player's turn) is decided by the engine.

/// A table command accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    /// Add to the current bet. Negative amounts are passed on so the engine
    /// can reject them with its own message.
    Bet(i64),
    Deal,
    Hit,
    Stay,
    /// Restart with fresh money after going bankrupt
    Reset,
    /// Reprint the table
    Status,
}

/// Result of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(TableCommand),
    Help,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  bet <amount>   add chips to the current bet
  deal (d)       deal a round, or clear the table after one
  hit (h)        take another card
  stay (s)       stand and let the dealer play
  reset          start over with fresh money after going bankrupt
  status         show the table again
  help (?)       show this list
  quit (q)       leave the table";

/// Parse user input into a [`TableCommand`] or a session command.
///
/// Input is case-insensitive and surrounding whitespace is ignored.
///
/// ```rust
/// # use blackjack_cli::validation::{parse_table_command, ParseResult, TableCommand};
/// assert_eq!(
///     parse_table_command("bet 25"),
///     ParseResult::Command(TableCommand::Bet(25))
/// );
/// assert_eq!(parse_table_command("H"), ParseResult::Command(TableCommand::Hit));
/// assert_eq!(parse_table_command("q"), ParseResult::Quit);
/// ```
pub fn parse_table_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    let command = match head {
        "q" | "quit" | "exit" => return ParseResult::Quit,
        "help" | "?" => return ParseResult::Help,
        "bet" | "b" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Bet requires an amount (e.g., 'bet 10')".to_string(),
                );
            };
            match amount.parse::<i64>() {
                Ok(n) => TableCommand::Bet(n),
                Err(_) => {
                    return ParseResult::Invalid(format!("Invalid bet amount '{}'", amount));
                }
            }
        }
        "deal" | "d" => TableCommand::Deal,
        "hit" | "h" => TableCommand::Hit,
        "stay" | "stand" | "s" => TableCommand::Stay,
        "reset" => TableCommand::Reset,
        "status" => TableCommand::Status,
        other => {
            return ParseResult::Invalid(format!(
                "Unrecognized command '{}'. Type 'help' for the list of commands",
                other
            ));
        }
    };

    let expected_args = usize::from(matches!(command, TableCommand::Bet(_)));
    if parts.len() > 1 + expected_args {
        return ParseResult::Invalid(format!("Unexpected input after '{}'", head));
    }
    ParseResult::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_table_command() {
        assert_eq!(
            parse_table_command("deal"),
            ParseResult::Command(TableCommand::Deal)
        );
        assert_eq!(
            parse_table_command("d"),
            ParseResult::Command(TableCommand::Deal)
        );
        assert_eq!(
            parse_table_command("hit"),
            ParseResult::Command(TableCommand::Hit)
        );
        assert_eq!(
            parse_table_command("stand"),
            ParseResult::Command(TableCommand::Stay)
        );
        assert_eq!(
            parse_table_command("reset"),
            ParseResult::Command(TableCommand::Reset)
        );
        assert_eq!(
            parse_table_command("status"),
            ParseResult::Command(TableCommand::Status)
        );
    }

    #[test]
    fn bet_keeps_negative_amounts_for_the_engine() {
        assert_eq!(
            parse_table_command("bet -5"),
            ParseResult::Command(TableCommand::Bet(-5))
        );
    }

    #[test]
    fn bet_without_amount_is_invalid() {
        match parse_table_command("bet") {
            ParseResult::Invalid(msg) => assert!(msg.contains("requires an amount")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn bet_with_garbage_amount_is_invalid() {
        match parse_table_command("bet ten") {
            ParseResult::Invalid(msg) => assert!(msg.contains("ten")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(
            parse_table_command("  STAY  "),
            ParseResult::Command(TableCommand::Stay)
        );
        assert_eq!(parse_table_command("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn trailing_words_are_rejected() {
        assert!(matches!(
            parse_table_command("hit me"),
            ParseResult::Invalid(_)
        ));
        assert!(matches!(
            parse_table_command("bet 5 6"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn empty_and_unknown_input() {
        assert_eq!(
            parse_table_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
        match parse_table_command("split") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn help_aliases() {
        assert_eq!(parse_table_command("help"), ParseResult::Help);
        assert_eq!(parse_table_command("?"), ParseResult::Help);
    }
}
