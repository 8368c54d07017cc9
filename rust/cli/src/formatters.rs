//! Card and table formatters for terminal display.
//!
//! Suits render as Unicode symbols where the terminal is expected to support
//! them and as single letters otherwise. The dealer's face-down card renders
//! as `??`.
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_hand};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_hand(&[ace]).starts_with("[A"));
//! ```

use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::game::{Phase, RoundSnapshot};
use blackjack_engine::rules::Outcome;

/// Whether the terminal is expected to render suit symbols.
///
/// Windows consoles only get symbols inside Windows Terminal, a terminal that
/// sets `TERM_PROGRAM`, or VS Code. Everything else is assumed to cope.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    match (suit, supports_unicode()) {
        (Suit::Hearts, true) => "♥",
        (Suit::Diamonds, true) => "♦",
        (Suit::Clubs, true) => "♣",
        (Suit::Spades, true) => "♠",
        (Suit::Hearts, false) => "h",
        (Suit::Diamonds, false) => "d",
        (Suit::Clubs, false) => "c",
        (Suit::Spades, false) => "s",
    }
}

/// Rank as shown on the card face (A, 2-9, 10, J, Q, K).
pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in bracket notation, e.g. `[A♠ 10♥]`.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Dealer cards as seen by the player; hidden cards render as `??`.
pub fn format_dealer_hand(cards: &[Option<Card>]) -> String {
    let formatted: Vec<String> = cards
        .iter()
        .map(|c| c.as_ref().map_or_else(|| "??".to_string(), format_card))
        .collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_phase(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingBet => "place your bet",
        Phase::PlayerTurn => "your move",
        Phase::DealerTurn => "dealer's turn",
        Phase::RoundOver => "round over",
        Phase::Bankrupt => "bankrupt",
    }
}

/// One-line verdict for a finished round.
pub fn format_outcome(snap: &RoundSnapshot) -> Option<String> {
    let outcome = snap.outcome?;
    let flags = &snap.flags;
    let msg = match outcome {
        Outcome::NaturalWin => "Blackjack! You win 3:2".to_string(),
        Outcome::Win if flags.dealer_bust => "Dealer busts. You win".to_string(),
        Outcome::Win if flags.player_blackjack => "21! You win".to_string(),
        Outcome::Win => "You win".to_string(),
        Outcome::Push if flags.player_bust && flags.dealer_bust => {
            "Both bust. Push".to_string()
        }
        Outcome::Push => "Push".to_string(),
        Outcome::Loss if flags.player_bust => "Bust! Dealer wins".to_string(),
        Outcome::Loss if flags.dealer_blackjack && snap.dealer_hand.len() == 2 => {
            "Dealer has blackjack".to_string()
        }
        Outcome::Loss => "Dealer wins".to_string(),
    };
    Some(msg)
}

/// Multi-line rendering of the table after a command.
pub fn format_snapshot(snap: &RoundSnapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Money: {}  Bet: {}  Deck: {}  ({})",
        snap.money,
        snap.current_bet,
        snap.deck_remaining,
        format_phase(snap.phase)
    ));
    if !snap.dealer_hand.is_empty() {
        let total = snap
            .dealer_total
            .map_or_else(|| "?".to_string(), |t| t.to_string());
        lines.push(format!(
            "Dealer: {} ({})",
            format_dealer_hand(&snap.dealer_hand),
            total
        ));
    }
    if !snap.player_hand.is_empty() {
        lines.push(format!(
            "You:    {} ({})",
            format_hand(&snap.player_hand),
            snap.player_total
        ));
    }
    if let Some(verdict) = format_outcome(snap) {
        lines.push(verdict);
    }
    lines.join("\n")
}
