//! The `shuffle` command: shows the order a seeded deck would deal in.

use crate::error::CliError;
use crate::formatters::format_card;
use blackjack_engine::deck::Deck;
use std::io::Write;

const CARDS_PER_LINE: usize = 13;

pub fn handle_shuffle_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    writeln!(out, "seed={}", seed)?;

    let dealt: Vec<String> = std::iter::from_fn(|| deck.deal())
        .map(|c| format_card(&c))
        .collect();
    for line in dealt.chunks(CARDS_PER_LINE) {
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}
