use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Best total a hand can reach without busting.
pub const BLACKJACK: u32 = 21;

/// Ace relocations allowed before the evaluator stops reordering. A single
/// 52-card deck never puts more than four aces in one hand.
const MAX_ACE_RELOCATIONS: usize = 4;

/// Returns a copy of `cards` with the aces moved behind every other card.
///
/// Relative order is kept among non-aces and among aces. Reordering stops
/// once more than [`MAX_ACE_RELOCATIONS`] aces have been moved.
pub fn aces_last(cards: &[Card]) -> Vec<Card> {
    let mut working = cards.to_vec();
    let mut unvisited = working.len();
    let mut relocations = 0;
    let mut i = 0;
    while i < unvisited {
        if working[i].is_ace() {
            let ace = working.remove(i);
            working.push(ace);
            unvisited -= 1;
            relocations += 1;
            if relocations > MAX_ACE_RELOCATIONS {
                break;
            }
        } else {
            i += 1;
        }
    }
    working
}

/// Point total of a hand.
///
/// Aces are counted after every other card; each ace is worth 11 while the
/// running total is at most 10 and 1 otherwise. The choice is made one ace at
/// a time and never revisited, so a hand can bust where all-ones would not:
/// `[5, 5, A, A]` counts 22, not 12. The caller's slice is left untouched.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::count;
///
/// let hand = [
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Nine, Suit::Clubs),
/// ];
/// assert_eq!(count(&hand), 21);
/// assert_eq!(count(&[]), 0);
/// ```
pub fn count(cards: &[Card]) -> u32 {
    aces_last(cards).iter().fold(0, |total, card| {
        if card.is_ace() {
            if total <= 10 {
                total + 11
            } else {
                total + 1
            }
        } else {
            total + card.point_value()
        }
    })
}

pub fn is_bust(cards: &[Card]) -> bool {
    count(cards) > BLACKJACK
}

/// Two cards totalling 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && count(cards) == BLACKJACK
}

/// Cards held by one side of the table for the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn total(&self) -> u32 {
        count(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Moves a leading ace to the back of the hand. Applied to both hands when
    /// the player stays; the total is unaffected.
    pub fn move_leading_ace_to_back(&mut self) {
        if self.cards.first().is_some_and(Card::is_ace) {
            let ace = self.cards.remove(0);
            self.cards.push(ace);
        }
    }
}
