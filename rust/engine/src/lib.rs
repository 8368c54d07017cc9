//! # blackjack-engine: Single-Player Blackjack Core
//!
//! A blackjack engine for one player against a house dealer. Provides the deck
//! with its riffle shuffle, ace-flexible hand valuation, and the betting/round
//! state machine with payout rules. Rendering and input handling live outside
//! this crate: a front end sends commands and renders the snapshot each one
//! returns.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Riffle shuffling behind an injectable [`deck::ShuffleSource`]
//! - [`hand`] - Hand valuation with soft/hard aces
//! - [`rules`] - Bet validation, outcome resolution and payouts
//! - [`player`] - The player's bankroll
//! - [`game`] - Phases, outcome flags and round snapshots
//! - [`engine`] - The round engine and its command surface
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for rejected commands
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::engine::Engine;
//!
//! let mut engine = Engine::new(Some(42));
//! engine.place_bet(25).unwrap();
//! let snap = engine.deal().unwrap();
//! println!("player holds {} ({})", snap.player_hand.len(), snap.player_total);
//! ```
//!
//! ## Hand Valuation
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::count;
//!
//! let hand = [
//!     Card::new(Rank::Ten, Suit::Clubs),
//!     Card::new(Rank::Nine, Suit::Hearts),
//!     Card::new(Rank::Ace, Suit::Spades),
//! ];
//! assert_eq!(count(&hand), 20);
//! ```
//!
//! ## Deterministic Shuffles
//!
//! ```rust
//! use blackjack_engine::deck::Deck;
//!
//! // Same seed produces same order
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.cards(), deck2.cards());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
