use thiserror::Error;

use crate::game::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount} ({reason})")]
    InvalidBet { amount: i64, reason: BetRejection },
    #[error("Cannot {action} while {phase}")]
    IllegalTransition { action: &'static str, phase: Phase },
    #[error("A bet must be placed before dealing")]
    BetRequired,
    #[error("Deck exhausted: no undealt cards remain")]
    DeckExhausted,
}

/// Why a bet was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BetRejection {
    #[error("bet cannot be negative")]
    Negative,
    #[error("only {available} available")]
    ExceedsMoney { available: u32 },
}
