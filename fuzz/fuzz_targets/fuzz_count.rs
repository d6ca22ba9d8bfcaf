//! Fuzz target for card count parsing.
//!
//! Tests that any count string yields between 1 and 20 cards.

#![no_main]

use cardlab::{CardCount, CardGenerator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let count = CardCount::parse(data);
    assert!((CardCount::MIN..=CardCount::MAX).contains(&count.get()));

    let envelope = CardGenerator::new(data).card_count(count).generate();
    assert_eq!(envelope.cards.len(), count.get());
});
