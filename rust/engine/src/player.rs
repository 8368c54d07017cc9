use serde::{Deserialize, Serialize};

use crate::errors::{BetRejection, GameError};

/// The player's money and the chips currently riding on the round.
///
/// Money only moves in two ways: into the bet when one is placed, and back
/// out through [`Bankroll::settle`] when the round resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bankroll {
    /// Money not committed to a bet
    money: u32,
    /// Accumulated bet for the round in progress
    current_bet: u32,
}

impl Bankroll {
    pub fn new(money: u32) -> Self {
        Self {
            money,
            current_bet: 0,
        }
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn is_broke(&self) -> bool {
        self.money == 0 && self.current_bet == 0
    }

    /// Moves `amount` from money into the current bet.
    pub fn stake(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.money {
            return Err(GameError::InvalidBet {
                amount: i64::from(amount),
                reason: BetRejection::ExceedsMoney {
                    available: self.money,
                },
            });
        }
        self.money -= amount;
        self.current_bet += amount;
        Ok(())
    }

    /// Ends the round: credits `payout` and clears the bet. Returns the bet
    /// that was settled.
    pub fn settle(&mut self, payout: u32) -> u32 {
        let bet = self.current_bet;
        self.money = self.money.saturating_add(payout);
        self.current_bet = 0;
        bet
    }

    pub fn reset(&mut self, money: u32) {
        self.money = money;
        self.current_bet = 0;
    }
}
