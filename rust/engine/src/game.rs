use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::Outcome;

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Table is clear; bets may be placed and the round dealt.
    AwaitingBet,
    /// Cards are out and the player may hit or stay.
    PlayerTurn,
    /// Dealer is drawing. Only ever set inside `stay`.
    DealerTurn,
    /// Round resolved; `deal` clears the table for the next one.
    RoundOver,
    /// Round resolved with no money left; only a reset continues play.
    Bankrupt,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::AwaitingBet => "awaiting a bet",
            Phase::PlayerTurn => "the player is acting",
            Phase::DealerTurn => "the dealer is drawing",
            Phase::RoundOver => "the round is over",
            Phase::Bankrupt => "bankrupt",
        };
        f.write_str(s)
    }
}

/// A command the engine accepted during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Bet(u32),
    Deal,
    Hit,
    Stay,
}

/// Flags describing how the last round ended. All false while a round is
/// still being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeFlags {
    /// Player finished on 21 (natural or drawn)
    pub player_blackjack: bool,
    /// Dealer finished on 21 (natural or drawn)
    pub dealer_blackjack: bool,
    /// Push. Also set alongside both blackjack flags when both hands open
    /// on a natural.
    pub tie: bool,
    pub player_bust: bool,
    pub dealer_bust: bool,
    /// Player took the round, including an opening natural; a natural win
    /// sets this as well as `player_blackjack`.
    pub player_won: bool,
    /// Dealer took the round, including an opening natural; a dealer natural
    /// sets this as well as `dealer_blackjack`.
    pub dealer_won: bool,
    pub bankrupt: bool,
}

/// Read-only view of the engine handed to the presentation layer after
/// every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub money: u32,
    pub current_bet: u32,
    pub player_hand: Vec<Card>,
    pub player_total: u32,
    /// Dealer cards in deal order; `None` marks the face-down hole card
    pub dealer_hand: Vec<Option<Card>>,
    /// Dealer total, only once the hole card is revealed
    pub dealer_total: Option<u32>,
    pub outcome: Option<Outcome>,
    pub flags: OutcomeFlags,
    /// Undealt cards left in the deck
    pub deck_remaining: usize,
    /// Rounds dealt so far this session
    pub round: u32,
}

impl RoundSnapshot {
    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, Phase::RoundOver | Phase::Bankrupt)
    }

    pub fn hole_card_hidden(&self) -> bool {
        self.dealer_hand.first().is_some_and(Option::is_none)
    }
}
