use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Fewest riffle passes a single shuffle performs.
pub const MIN_RIFFLE_PASSES: usize = 3;
/// Most riffle passes a single shuffle performs.
pub const MAX_RIFFLE_PASSES: usize = 22;

/// Source of the random decisions made while shuffling.
///
/// The deck only ever asks two questions: how many riffle passes to run and,
/// for each pass, whether the high half leads the interleave. Tests swap in a
/// scripted implementation to make the order predictable.
pub trait ShuffleSource {
    /// Number of riffle passes for the next shuffle, expected in
    /// `MIN_RIFFLE_PASSES..=MAX_RIFFLE_PASSES`.
    fn passes(&mut self) -> usize;

    /// `true` when the high half should be dealt first in this pass.
    fn high_half_first(&mut self) -> bool;
}

/// Default [`ShuffleSource`] backed by a seeded ChaCha20 RNG.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha20Rng,
}

impl ChaChaSource {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl ShuffleSource for ChaChaSource {
    fn passes(&mut self) -> usize {
        self.rng.random_range(MIN_RIFFLE_PASSES..=MAX_RIFFLE_PASSES)
    }

    fn high_half_first(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// One perfect riffle of `cards`.
///
/// The low half holds `len / 2` cards and the high half the rest, so for an
/// odd length the high half carries one extra card. Cards alternate between
/// the leading and trailing half; the unmatched card of the high half goes
/// last. The result is always a permutation of the input.
pub fn riffle(cards: &[Card], high_half_first: bool) -> Vec<Card> {
    let half = cards.len() / 2;
    let (low, high) = cards.split_at(half);
    let (first, second) = if high_half_first {
        (high, low)
    } else {
        (low, high)
    };

    let mut out = Vec::with_capacity(cards.len());
    for i in 0..half {
        out.push(first[i]);
        out.push(second[i]);
    }
    // odd length: the high half still holds its last card
    if let Some(&extra) = high.get(half) {
        out.push(extra);
    }
    out
}

/// Saved card order and deal position of a [`Deck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckState {
    cards: Vec<Card>,
    undealt: usize,
}

/// A deck of cards dealt from the top (highest index) down.
///
/// `undealt` marks the boundary: `cards[..undealt]` are still in the deck,
/// `cards[undealt..]` have been dealt.
#[derive(Debug)]
pub struct Deck<S = ChaChaSource> {
    cards: Vec<Card>,
    undealt: usize,
    source: S,
}

impl Deck<ChaChaSource> {
    /// Full 52-card deck shuffled with a ChaCha20 source seeded by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(ChaChaSource::new_with_seed(seed))
    }
}

impl<S: ShuffleSource> Deck<S> {
    /// Full 52-card deck in suit-major order, shuffled once before returning.
    pub fn new(source: S) -> Self {
        let mut deck = Self::from_cards(full_deck(), source);
        deck.shuffle();
        deck
    }

    /// Deck holding exactly `cards`, left in the given order. The last card of
    /// the vector is the first one dealt.
    pub fn from_cards(cards: Vec<Card>, source: S) -> Self {
        let undealt = cards.len();
        Self {
            cards,
            undealt,
            source,
        }
    }

    /// Riffles the whole backing sequence a random number of times and makes
    /// every card available again.
    pub fn shuffle(&mut self) {
        let passes = self
            .source
            .passes()
            .clamp(MIN_RIFFLE_PASSES, MAX_RIFFLE_PASSES);
        for _ in 0..passes {
            let high_first = self.source.high_half_first();
            self.cards = riffle(&self.cards, high_first);
        }
        self.undealt = self.cards.len();
    }

    /// Shuffles, then moves every card listed in `in_play` into the dealt
    /// region so it cannot be dealt twice while it is still on the table.
    pub fn shuffle_excluding(&mut self, in_play: &[Card]) {
        self.shuffle();
        let (free, held): (Vec<Card>, Vec<Card>) =
            self.cards.iter().copied().partition(|c| !in_play.contains(c));
        self.undealt = free.len();
        self.cards = free;
        self.cards.extend(held);
    }

    /// Deals the top undealt card, or `None` when every card has been dealt.
    pub fn deal(&mut self) -> Option<Card> {
        if self.undealt == 0 {
            return None;
        }
        self.undealt -= 1;
        Some(self.cards[self.undealt])
    }

    /// Number of undealt cards.
    pub fn size(&self) -> usize {
        self.undealt
    }

    pub fn is_empty(&self) -> bool {
        self.undealt == 0
    }

    /// Total number of cards the deck owns, dealt or not.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Captures the order and deal position so a failed command can be
    /// rolled back with [`Deck::restore`]. The shuffle source is not saved.
    pub fn state(&self) -> DeckState {
        DeckState {
            cards: self.cards.clone(),
            undealt: self.undealt,
        }
    }

    pub fn restore(&mut self, state: DeckState) {
        self.cards = state.cards;
        self.undealt = state.undealt;
    }

    /// Backing order, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards still to be dealt, bottom first; the last element is dealt next.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[..self.undealt]
    }
}
