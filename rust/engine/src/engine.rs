use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::{ChaChaSource, Deck, DeckState, ShuffleSource};
use crate::errors::GameError;
use crate::game::{Action, OutcomeFlags, Phase, RoundSnapshot};
use crate::hand::{Hand, BLACKJACK};
use crate::logger::RoundRecord;
use crate::player::Bankroll;
use crate::rules::{
    dealer_should_draw, resolve, resolve_naturals, validate_bet, Outcome, RESHUFFLE_THRESHOLD,
    STARTING_MONEY,
};

/// Engine state a dealing command may touch before its last draw.
struct Checkpoint {
    deck: DeckState,
    player: Hand,
    dealer: Hand,
    phase: Phase,
    flags: OutcomeFlags,
    outcome: Option<Outcome>,
    settled: Option<(u32, u32)>,
    actions: usize,
}

/// Single-player blackjack round engine.
///
/// Owns the deck, both hands and the player's money. The presentation layer
/// drives it with commands (`place_bet`, `deal`, `hit`, `stay`,
/// `reset_from_bankruptcy`) and renders the [`RoundSnapshot`] each one
/// returns. A rejected command leaves the engine untouched.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::Engine;
/// use blackjack_engine::game::Phase;
///
/// let mut engine = Engine::new(Some(12345));
/// engine.place_bet(10).expect("bet within money");
///
/// let snap = engine.deal().expect("bet placed");
/// assert_eq!(snap.player_hand.len(), 2);
/// assert!(matches!(snap.phase, Phase::PlayerTurn | Phase::RoundOver));
///
/// if snap.phase == Phase::PlayerTurn {
///     let snap = engine.stay().expect("player turn");
///     assert!(snap.is_round_over());
///     assert_eq!(snap.current_bet, 0);
/// }
/// ```
#[derive(Debug)]
pub struct Engine<S = ChaChaSource> {
    deck: Deck<S>,
    bankroll: Bankroll,
    player: Hand,
    dealer: Hand,
    phase: Phase,
    flags: OutcomeFlags,
    outcome: Option<Outcome>,
    /// Commands accepted since the table was last cleared
    actions: Vec<Action>,
    /// Bet and payout of the last resolved round
    settled: Option<(u32, u32)>,
    round: u32,
    seed: Option<u64>,
}

impl Engine<ChaChaSource> {
    /// Engine with a freshly shuffled ChaCha20-backed deck and the starting
    /// money. `None` picks a random seed.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut engine = Self::with_deck(Deck::new_with_seed(seed));
        engine.seed = Some(seed);
        engine
    }
}

impl<S: ShuffleSource> Engine<S> {
    /// Engine playing from `deck` as given, with the starting money.
    pub fn with_deck(deck: Deck<S>) -> Self {
        Self {
            deck,
            bankroll: Bankroll::new(STARTING_MONEY),
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::AwaitingBet,
            flags: OutcomeFlags::default(),
            outcome: None,
            actions: Vec::new(),
            settled: None,
            round: 0,
            seed: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn money(&self) -> u32 {
        self.bankroll.money()
    }

    pub fn current_bet(&self) -> u32 {
        self.bankroll.current_bet()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.size()
    }

    /// Adds `amount` to the current bet.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalTransition`] outside [`Phase::AwaitingBet`]
    /// - [`GameError::InvalidBet`] for a negative amount or one above the
    ///   remaining money
    pub fn place_bet(&mut self, amount: i64) -> Result<RoundSnapshot, GameError> {
        self.require(Phase::AwaitingBet, "place a bet")?;
        let stake = validate_bet(self.bankroll.money(), amount)?;
        if stake > 0 {
            self.bankroll.stake(stake)?;
            self.actions.push(Action::Bet(stake));
        }
        debug!(
            stake,
            money = self.bankroll.money(),
            bet = self.bankroll.current_bet(),
            "bet placed"
        );
        Ok(self.snapshot())
    }

    /// Deals a new round, or clears the table after a finished one.
    ///
    /// From [`Phase::AwaitingBet`] with a bet down, four cards go out
    /// alternating player and dealer, and naturals are settled immediately.
    /// From [`Phase::RoundOver`] the hands and flags are cleared and the
    /// engine waits for the next bet.
    ///
    /// # Errors
    ///
    /// - [`GameError::BetRequired`] in [`Phase::AwaitingBet`] with no bet
    /// - [`GameError::IllegalTransition`] in any other phase
    /// - [`GameError::DeckExhausted`] if fewer than four cards can be dealt;
    ///   the engine is left as it was before the call
    pub fn deal(&mut self) -> Result<RoundSnapshot, GameError> {
        match self.phase {
            Phase::RoundOver => {
                self.clear_table();
                debug!("table cleared");
                return Ok(self.snapshot());
            }
            Phase::AwaitingBet if self.bankroll.current_bet() == 0 => {
                return Err(GameError::BetRequired);
            }
            Phase::AwaitingBet => {}
            phase => {
                return Err(GameError::IllegalTransition {
                    action: "deal",
                    phase,
                })
            }
        }

        let saved = self.checkpoint();
        if let Err(e) = self.deal_opening_cards() {
            self.rollback(saved);
            return Err(e);
        }
        self.round += 1;
        self.actions.push(Action::Deal);
        self.phase = Phase::PlayerTurn;
        debug!(
            round = self.round,
            player_total = self.player.total(),
            "round dealt"
        );

        let player_natural = self.player.is_natural();
        let dealer_natural = self.dealer.is_natural();
        if let Some(outcome) = resolve_naturals(player_natural, dealer_natural) {
            self.flags.player_blackjack = player_natural;
            self.flags.dealer_blackjack = dealer_natural;
            self.mark_result(outcome);
            self.finish(outcome);
        }
        Ok(self.snapshot())
    }

    /// Deals one card to the player. A bust loses the bet; reaching 21 wins
    /// it at even money.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalTransition`] outside [`Phase::PlayerTurn`].
    pub fn hit(&mut self) -> Result<RoundSnapshot, GameError> {
        self.require(Phase::PlayerTurn, "hit")?;
        let card = self.draw()?;
        self.player.add_card(card);
        self.actions.push(Action::Hit);

        let total = self.player.total();
        debug!(?card, total, "player hit");
        if total > BLACKJACK {
            self.flags.player_bust = true;
            self.mark_result(Outcome::Loss);
            self.finish(Outcome::Loss);
        } else if total == BLACKJACK {
            self.flags.player_blackjack = true;
            self.mark_result(Outcome::Win);
            self.finish(Outcome::Win);
        }
        Ok(self.snapshot())
    }

    /// Ends the player's turn, plays out the dealer and settles the round.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalTransition`] outside [`Phase::PlayerTurn`]
    /// - [`GameError::DeckExhausted`] if the dealer needs a card and none is
    ///   free; the round stays in [`Phase::PlayerTurn`] untouched
    pub fn stay(&mut self) -> Result<RoundSnapshot, GameError> {
        self.require(Phase::PlayerTurn, "stay")?;
        let saved = self.checkpoint();
        self.actions.push(Action::Stay);
        if let Err(e) = self.play_dealer() {
            self.rollback(saved);
            return Err(e);
        }

        let player_total = self.player.total();
        let dealer_total = self.dealer.total();
        self.flags.player_blackjack = player_total == BLACKJACK;
        self.flags.dealer_blackjack = dealer_total == BLACKJACK;
        self.flags.player_bust = player_total > BLACKJACK;
        self.flags.dealer_bust = dealer_total > BLACKJACK;

        let outcome = resolve(player_total, dealer_total);
        self.mark_result(outcome);
        self.finish(outcome);
        Ok(self.snapshot())
    }

    /// Restores the starting money after going broke and clears the table.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalTransition`] outside [`Phase::Bankrupt`].
    pub fn reset_from_bankruptcy(&mut self) -> Result<RoundSnapshot, GameError> {
        self.require(Phase::Bankrupt, "reset the bankroll")?;
        self.bankroll.reset(STARTING_MONEY);
        self.clear_table();
        info!(money = STARTING_MONEY, "bankroll reset");
        Ok(self.snapshot())
    }

    /// Current state as seen by the player. The dealer's first card stays
    /// face down while the player is still acting.
    pub fn snapshot(&self) -> RoundSnapshot {
        let hole_hidden = self.phase == Phase::PlayerTurn;
        let dealer_hand = self
            .dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(i, &c)| if i == 0 && hole_hidden { None } else { Some(c) })
            .collect();
        let dealer_total = if hole_hidden || self.dealer.is_empty() {
            None
        } else {
            Some(self.dealer.total())
        };

        RoundSnapshot {
            phase: self.phase,
            money: self.bankroll.money(),
            current_bet: self.bankroll.current_bet(),
            player_hand: self.player.cards().to_vec(),
            player_total: self.player.total(),
            dealer_hand,
            dealer_total,
            outcome: self.outcome,
            flags: self.flags,
            deck_remaining: self.deck.size(),
            round: self.round,
        }
    }

    /// Record of the last resolved round, while its cards are still on the
    /// table. `None` before the first round and after the table is cleared.
    pub fn round_record(&self) -> Option<RoundRecord> {
        let outcome = self.outcome?;
        let (bet, payout) = self.settled?;
        Some(RoundRecord {
            round_id: String::new(),
            seed: self.seed,
            actions: self.actions.clone(),
            player_hand: self.player.cards().to_vec(),
            dealer_hand: self.dealer.cards().to_vec(),
            player_total: self.player.total(),
            dealer_total: self.dealer.total(),
            bet,
            payout,
            outcome,
            flags: self.flags,
            money_after: self.bankroll.money(),
            ts: None,
        })
    }

    /// Clears the table and deals two cards each, player first.
    fn deal_opening_cards(&mut self) -> Result<(), GameError> {
        self.player.clear();
        self.dealer.clear();
        self.flags = OutcomeFlags::default();
        self.outcome = None;
        self.settled = None;

        if self.deck.size() < RESHUFFLE_THRESHOLD {
            info!(remaining = self.deck.size(), "reshuffling before deal");
            self.deck.shuffle();
        }
        for i in 0..4 {
            let card = self.draw()?;
            if i % 2 == 0 {
                self.player.add_card(card);
            } else {
                self.dealer.add_card(card);
            }
        }
        Ok(())
    }

    /// Dealer draws while at or below the drawing limit.
    fn play_dealer(&mut self) -> Result<(), GameError> {
        self.dealer.move_leading_ace_to_back();
        self.player.move_leading_ace_to_back();

        self.phase = Phase::DealerTurn;
        while dealer_should_draw(self.dealer.total()) {
            let card = self.draw()?;
            self.dealer.add_card(card);
            debug!(?card, total = self.dealer.total(), "dealer draws");
        }
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            deck: self.deck.state(),
            player: self.player.clone(),
            dealer: self.dealer.clone(),
            phase: self.phase,
            flags: self.flags,
            outcome: self.outcome,
            settled: self.settled,
            actions: self.actions.len(),
        }
    }

    /// Puts back everything a failed `deal` or `stay` changed.
    fn rollback(&mut self, saved: Checkpoint) {
        warn!(phase = %saved.phase, "command failed, rolling back");
        self.deck.restore(saved.deck);
        self.player = saved.player;
        self.dealer = saved.dealer;
        self.phase = saved.phase;
        self.flags = saved.flags;
        self.outcome = saved.outcome;
        self.settled = saved.settled;
        self.actions.truncate(saved.actions);
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::IllegalTransition {
                action,
                phase: self.phase,
            })
        }
    }

    /// Next card from the deck. If the deck has run dry mid-round it is
    /// reshuffled with the cards on the table held back.
    fn draw(&mut self) -> Result<Card, GameError> {
        if self.deck.is_empty() {
            let in_play: Vec<Card> = self
                .player
                .cards()
                .iter()
                .chain(self.dealer.cards())
                .copied()
                .collect();
            warn!(in_play = in_play.len(), "deck ran out mid-round, restocking");
            self.deck.shuffle_excluding(&in_play);
        }
        self.deck.deal().ok_or(GameError::DeckExhausted)
    }

    fn mark_result(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::NaturalWin | Outcome::Win => self.flags.player_won = true,
            Outcome::Loss => self.flags.dealer_won = true,
            Outcome::Push => self.flags.tie = true,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let bet = self.bankroll.current_bet();
        let payout = outcome.payout(bet);
        self.bankroll.settle(payout);
        self.outcome = Some(outcome);
        self.settled = Some((bet, payout));

        if self.bankroll.is_broke() {
            self.flags.bankrupt = true;
            self.phase = Phase::Bankrupt;
        } else {
            self.phase = Phase::RoundOver;
        }
        info!(
            round = self.round,
            ?outcome,
            bet,
            payout,
            money = self.bankroll.money(),
            "round resolved"
        );
    }

    fn clear_table(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.flags = OutcomeFlags::default();
        self.outcome = None;
        self.settled = None;
        self.actions.clear();
        self.phase = Phase::AwaitingBet;
    }
}
