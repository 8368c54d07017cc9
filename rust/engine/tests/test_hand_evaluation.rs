use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::hand::{count, is_bust, is_natural, Hand};

fn c(r: R) -> Card {
    Card::new(r, S::Hearts)
}

#[test]
fn ace_with_nine_is_soft_twenty() {
    assert_eq!(count(&[c(R::Ace), c(R::Nine)]), 20);
}

#[test]
fn two_aces_and_nine_make_twenty_one() {
    assert_eq!(count(&[c(R::Ace), c(R::Ace), c(R::Nine)]), 21);
    assert_eq!(count(&[c(R::Ace), c(R::Nine), c(R::Ace)]), 21);
    assert_eq!(count(&[c(R::Nine), c(R::Ace), c(R::Ace)]), 21);
}

#[test]
fn late_ace_counts_one() {
    assert_eq!(count(&[c(R::Ten), c(R::Nine), c(R::Ace)]), 20);
}

#[test]
fn face_cards_sum_to_twenty() {
    assert_eq!(count(&[c(R::King), c(R::Queen)]), 20);
}

#[test]
fn empty_hand_is_zero() {
    assert_eq!(count(&[]), 0);
}

#[test]
fn count_leaves_input_order_alone() {
    let hand = vec![c(R::Ace), c(R::Five), c(R::Ace), c(R::Two)];
    let before = hand.clone();
    let first = count(&hand);
    let second = count(&hand);
    assert_eq!(hand, before);
    assert_eq!(first, second);
    assert_eq!(first, 19);
}

#[test]
fn bust_when_over_twenty_one() {
    assert!(is_bust(&[c(R::King), c(R::Queen), c(R::Two)]));
    assert!(!is_bust(&[c(R::King), c(R::Ace)]));
}

#[test]
fn every_ace_pairing_with_ten_value_is_natural() {
    for r in [R::Ten, R::Jack, R::Queen, R::King] {
        assert!(is_natural(&[c(R::Ace), c(r)]));
        assert!(is_natural(&[c(r), c(R::Ace)]));
    }
}

#[test]
fn hand_total_tracks_additions() {
    let mut hand = Hand::new();
    assert_eq!(hand.total(), 0);
    hand.add_card(c(R::Ace));
    assert_eq!(hand.total(), 11);
    hand.add_card(c(R::Seven));
    assert_eq!(hand.total(), 18);
    hand.add_card(c(R::Nine));
    assert_eq!(hand.total(), 17);
    hand.clear();
    assert!(hand.is_empty());
}
