use serde::{Deserialize, Serialize};

use crate::errors::{BetRejection, GameError};
use crate::hand::BLACKJACK;

/// Money a fresh session (or a bankruptcy reset) starts with.
pub const STARTING_MONEY: u32 = 100;

/// The engine reshuffles before a deal when fewer undealt cards remain.
pub const RESHUFFLE_THRESHOLD: usize = 8;

/// The dealer keeps drawing while its total is at or below this value.
pub const DEALER_DRAWS_TO: u32 = 16;

/// How a finished round is settled against the player's bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Player natural against a dealer without one: bet back plus 3:2.
    NaturalWin,
    /// Player wins: bet back doubled.
    Win,
    /// Tie: bet returned.
    Push,
    /// Dealer wins: bet forfeited.
    Loss,
}

impl Outcome {
    /// Amount returned to the player's money for a resolved `bet`.
    ///
    /// ```
    /// use blackjack_engine::rules::Outcome;
    ///
    /// assert_eq!(Outcome::NaturalWin.payout(10), 25);
    /// assert_eq!(Outcome::Win.payout(10), 20);
    /// assert_eq!(Outcome::Push.payout(10), 10);
    /// assert_eq!(Outcome::Loss.payout(10), 0);
    /// ```
    pub fn payout(self, bet: u32) -> u32 {
        match self {
            // the 1.5x winnings are truncated on odd bets
            Outcome::NaturalWin => bet.saturating_add(bet.saturating_mul(3) / 2),
            Outcome::Win => bet.saturating_mul(2),
            Outcome::Push => bet,
            Outcome::Loss => 0,
        }
    }
}

/// Validates a bet against the money the player still holds.
///
/// Returns the amount to move from money into the current bet. Zero is
/// accepted and changes nothing.
///
/// # Errors
///
/// [`GameError::InvalidBet`] when `amount` is negative or larger than `money`.
///
/// ```
/// use blackjack_engine::rules::validate_bet;
///
/// assert_eq!(validate_bet(100, 50), Ok(50));
/// assert!(validate_bet(100, -5).is_err());
/// assert!(validate_bet(100, 101).is_err());
/// ```
pub fn validate_bet(money: u32, amount: i64) -> Result<u32, GameError> {
    if amount < 0 {
        return Err(GameError::InvalidBet {
            amount,
            reason: BetRejection::Negative,
        });
    }
    match u32::try_from(amount) {
        Ok(stake) if stake <= money => Ok(stake),
        _ => Err(GameError::InvalidBet {
            amount,
            reason: BetRejection::ExceedsMoney { available: money },
        }),
    }
}

/// Settles the opening deal. `None` means neither side has a natural and play
/// continues.
pub fn resolve_naturals(player_natural: bool, dealer_natural: bool) -> Option<Outcome> {
    match (player_natural, dealer_natural) {
        (true, false) => Some(Outcome::NaturalWin),
        (false, true) => Some(Outcome::Loss),
        (true, true) => Some(Outcome::Push),
        (false, false) => None,
    }
}

/// Settles a round from the final totals of both hands.
pub fn resolve(player_total: u32, dealer_total: u32) -> Outcome {
    let player_bust = player_total > BLACKJACK;
    let dealer_bust = dealer_total > BLACKJACK;

    if player_bust && dealer_bust {
        return Outcome::Push;
    }
    if player_bust {
        return Outcome::Loss;
    }
    if dealer_bust {
        return Outcome::Win;
    }
    match (player_total == BLACKJACK, dealer_total == BLACKJACK) {
        (true, true) => Outcome::Push,
        (true, false) => Outcome::Win,
        (false, true) => Outcome::Loss,
        (false, false) => match player_total.cmp(&dealer_total) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Push,
        },
    }
}

pub fn dealer_should_draw(dealer_total: u32) -> bool {
    dealer_total <= DEALER_DRAWS_TO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_payout_truncates_half_chips() {
        assert_eq!(Outcome::NaturalWin.payout(3), 7);
        assert_eq!(Outcome::NaturalWin.payout(20), 50);
    }

    #[test]
    fn both_twenty_one_is_push() {
        assert_eq!(resolve(21, 21), Outcome::Push);
    }

    #[test]
    fn twenty_one_beats_lower_dealer() {
        assert_eq!(resolve(21, 20), Outcome::Win);
    }

    #[test]
    fn both_bust_is_push() {
        assert_eq!(resolve(23, 25), Outcome::Push);
    }

    #[test]
    fn dealer_bust_pays_player() {
        assert_eq!(resolve(12, 22), Outcome::Win);
        assert_eq!(resolve(21, 22), Outcome::Win);
    }

    #[test]
    fn player_bust_loses() {
        assert_eq!(resolve(22, 17), Outcome::Loss);
    }

    #[test]
    fn dealer_twenty_one_beats_lower_player() {
        assert_eq!(resolve(20, 21), Outcome::Loss);
    }

    #[test]
    fn higher_total_wins_and_equal_pushes() {
        assert_eq!(resolve(19, 18), Outcome::Win);
        assert_eq!(resolve(17, 18), Outcome::Loss);
        assert_eq!(resolve(18, 18), Outcome::Push);
    }

    #[test]
    fn naturals_table() {
        assert_eq!(resolve_naturals(true, false), Some(Outcome::NaturalWin));
        assert_eq!(resolve_naturals(false, true), Some(Outcome::Loss));
        assert_eq!(resolve_naturals(true, true), Some(Outcome::Push));
        assert_eq!(resolve_naturals(false, false), None);
    }

    #[test]
    fn dealer_stands_on_seventeen() {
        assert!(dealer_should_draw(16));
        assert!(!dealer_should_draw(17));
    }

    #[test]
    fn bet_rejection_reasons() {
        assert_eq!(
            validate_bet(10, -1),
            Err(GameError::InvalidBet {
                amount: -1,
                reason: BetRejection::Negative
            })
        );
        assert_eq!(
            validate_bet(10, 11),
            Err(GameError::InvalidBet {
                amount: 11,
                reason: BetRejection::ExceedsMoney { available: 10 }
            })
        );
        assert_eq!(validate_bet(10, 0), Ok(0));
        assert_eq!(validate_bet(10, 10), Ok(10));
    }
}
