//! Synthetic test card generation.
//!
//! Generated numbers pass the Luhn checksum and carry a real-looking brand
//! prefix, but they are not issued by any bank and must only be used as
//! test data.
//!
//! # Example
//!
//! ```
//! use cardlab::generate::generate;
//!
//! let envelope = generate("credit", 3);
//! assert_eq!(envelope.total, 3);
//! for card in &envelope.cards {
//!     assert!(cardlab::luhn::is_valid(&card.number));
//! }
//! ```
//!
//! Any `rand::Rng` can drive generation, which makes output reproducible
//! with a seeded generator:
//!
//! ```
//! use cardlab::generate::{generate_with_rng, CardCount};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let a = generate_with_rng("debit", CardCount::new(5), &mut StdRng::seed_from_u64(7));
//! let b = generate_with_rng("debit", CardCount::new(5), &mut StdRng::seed_from_u64(7));
//! assert_eq!(a, b);
//! ```

use crate::card::{BrandRule, CardBrand, BRAND_TABLE};
use crate::luhn;
use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;

const FIRST_NAMES: [&str; 15] = [
    "Gabriela", "Lucas", "Mariana", "Pedro", "Laura", "João", "Ana", "Rafael", "Beatriz",
    "Mateus", "Ella", "Liam", "Olivia", "Noah", "Emma",
];

const LAST_NAMES: [&str; 14] = [
    "Silva", "Souza", "Oliveira", "Pereira", "Santos", "Gomez", "Ferreira", "Costa", "Ribeiro",
    "Martins", "Murphy", "Johnson", "Brown", "Miller",
];

/// Two-digit expiry years handed out (2028 through 2040).
pub const EXPIRY_YEARS: RangeInclusive<u32> = 28..=40;

const CVV3_RANGE: RangeInclusive<u32> = 100..=999;
const CVV4_RANGE: RangeInclusive<u32> = 1000..=9999;

/// A number of cards to generate, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardCount(usize);

impl CardCount {
    /// Smallest batch.
    pub const MIN: usize = 1;
    /// Largest batch.
    pub const MAX: usize = 20;

    /// Clamps a requested count into `[MIN, MAX]`.
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(Self::MIN as i64, Self::MAX as i64) as usize)
    }

    /// Interprets a raw count the way a lenient integer parser would.
    ///
    /// Leading whitespace and a sign are allowed, trailing garbage after the
    /// leading digits is ignored, and input with no leading digits counts
    /// as 1. The result is then clamped.
    ///
    /// ```
    /// use cardlab::generate::CardCount;
    ///
    /// assert_eq!(CardCount::parse("5").get(), 5);
    /// assert_eq!(CardCount::parse("7abc").get(), 7);
    /// assert_eq!(CardCount::parse("lots").get(), 1);
    /// assert_eq!(CardCount::parse("999").get(), 20);
    /// assert_eq!(CardCount::parse("-5").get(), 1);
    /// ```
    pub fn parse(raw: &str) -> Self {
        leading_integer(raw).map_or_else(Self::default, Self::new)
    }

    /// The clamped count.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for CardCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // Anything too large for i64 clamps to MAX anyway.
    let value = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// One synthetic test card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SyntheticCard {
    /// Network the number was generated for.
    pub brand: CardBrand,
    /// Randomly assembled cardholder name.
    pub holder_name: String,
    /// Luhn-valid card number.
    pub number: String,
    /// 4 digits for American Express, 3 otherwise.
    pub cvv: String,
    /// `MM/YY`.
    pub expiry: String,
    /// Always true; these cards are test data.
    pub test: bool,
}

/// Result of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GenerationEnvelope {
    /// Always `"success"`.
    pub status: String,
    /// Number of cards in `cards`.
    pub total: usize,
    /// Generated cards, in generation order.
    pub cards: Vec<SyntheticCard>,
}

/// Card generator builder.
///
/// ```
/// use cardlab::generate::CardGenerator;
/// use cardlab::CardBrand;
///
/// let envelope = CardGenerator::new("credit")
///     .brand(CardBrand::AmericanExpress)
///     .count(2)
///     .generate();
///
/// assert_eq!(envelope.total, 2);
/// assert!(envelope.cards.iter().all(|c| c.cvv.len() == 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGenerator {
    card_type: String,
    brand: Option<CardBrand>,
    count: CardCount,
}

impl CardGenerator {
    /// Creates a generator for one card of a random brand.
    ///
    /// `card_type` (e.g. "credit" or "debit") is informational only and has
    /// no effect on the cards produced.
    pub fn new(card_type: impl Into<String>) -> Self {
        Self {
            card_type: card_type.into(),
            brand: None,
            count: CardCount::default(),
        }
    }

    /// Forces every card to the given brand.
    pub fn brand(mut self, brand: CardBrand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Sets an optional forced brand.
    pub fn maybe_brand(mut self, brand: Option<CardBrand>) -> Self {
        self.brand = brand;
        self
    }

    /// Sets the count, clamped to `[1, 20]`.
    pub fn count(mut self, count: i64) -> Self {
        self.count = CardCount::new(count);
        self
    }

    /// Sets an already-clamped count.
    pub fn card_count(mut self, count: CardCount) -> Self {
        self.count = count;
        self
    }

    /// Generates with the thread-local random generator.
    pub fn generate(&self) -> GenerationEnvelope {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generates with a caller-supplied random generator.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> GenerationEnvelope {
        tracing::debug!(
            card_type = %self.card_type,
            count = self.count.get(),
            brand = ?self.brand,
            "generating synthetic cards"
        );

        let cards: Vec<SyntheticCard> = (0..self.count.get())
            .map(|_| generate_synthetic_card(self.brand, rng))
            .collect();

        GenerationEnvelope {
            status: "success".to_string(),
            total: cards.len(),
            cards,
        }
    }
}

/// Generates `count` cards of random brands.
///
/// `card_type` is informational; `count` is clamped to `[1, 20]`.
pub fn generate(card_type: &str, count: i64) -> GenerationEnvelope {
    CardGenerator::new(card_type).count(count).generate()
}

/// Like [`generate`], with a caller-supplied random generator.
pub fn generate_with_rng<R: Rng + ?Sized>(
    card_type: &str,
    count: CardCount,
    rng: &mut R,
) -> GenerationEnvelope {
    CardGenerator::new(card_type)
        .card_count(count)
        .generate_with(rng)
}

/// Generates one complete card, optionally forcing its brand.
pub fn generate_synthetic_card<R: Rng + ?Sized>(
    forced: Option<CardBrand>,
    rng: &mut R,
) -> SyntheticCard {
    let brand = forced.unwrap_or_else(|| pick(&BRAND_TABLE, rng).brand);
    let number = generate_number_for_rule(brand.rule(), rng);

    SyntheticCard {
        brand,
        holder_name: holder_name(rng),
        number,
        cvv: cvv_for_brand(brand, rng),
        expiry: expiry(rng),
        test: true,
    }
}

/// Generates a Luhn-valid number from a random prefix and length of `rule`.
pub fn generate_number_for_rule<R: Rng + ?Sized>(rule: &BrandRule, rng: &mut R) -> String {
    let prefix = *pick(rule.prefixes, rng);
    let length = *pick(rule.valid_lengths, rng);
    generate_card_with_rng(prefix, length, rng)
}

/// Generates a valid card number with the given prefix and total length.
///
/// # Panics
///
/// Panics if `prefix` is not shorter than `length`.
///
/// ```
/// use cardlab::generate::generate_card_with_rng;
///
/// let card = generate_card_with_rng("411111", 16, &mut rand::thread_rng());
/// assert!(card.starts_with("411111"));
/// assert_eq!(card.len(), 16);
/// assert!(cardlab::luhn::is_valid(&card));
/// ```
pub fn generate_card_with_rng<R: Rng + ?Sized>(prefix: &str, length: usize, rng: &mut R) -> String {
    build_number(prefix, length, || rng.gen_range(0..10))
}

/// Generates a valid card number deterministically, zero-filling the body.
///
/// ```
/// use cardlab::generate::generate_card_deterministic_with_prefix;
///
/// let card = generate_card_deterministic_with_prefix("4", 16);
/// assert_eq!(card, "4000000000000002");
/// ```
pub fn generate_card_deterministic_with_prefix(prefix: &str, length: usize) -> String {
    build_number(prefix, length, || 0)
}

fn build_number(prefix: &str, length: usize, mut fill: impl FnMut() -> u8) -> String {
    assert!(
        prefix.len() < length,
        "Prefix length must be less than total length"
    );

    let mut digits: Vec<u8> = prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    while digits.len() < length - 1 {
        digits.push(fill());
    }

    let check_digit = luhn::generate_check_digit(&digits);
    digits.push(check_digit);

    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

fn holder_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(&FIRST_NAMES, rng), pick(&LAST_NAMES, rng))
}

fn expiry<R: Rng + ?Sized>(rng: &mut R) -> String {
    let month = rng.gen_range(1..=12u32);
    let year = rng.gen_range(EXPIRY_YEARS);
    format!("{:02}/{:02}", month, year)
}

fn cvv_for_brand<R: Rng + ?Sized>(brand: CardBrand, rng: &mut R) -> String {
    let range = match brand.cvv_length() {
        4 => CVV4_RANGE,
        _ => CVV3_RANGE,
    };
    rng.gen_range(range).to_string()
}

/// Uniform pick from a non-empty static slice.
fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_count_clamping() {
        assert_eq!(CardCount::new(0).get(), 1);
        assert_eq!(CardCount::new(-5).get(), 1);
        assert_eq!(CardCount::new(3).get(), 3);
        assert_eq!(CardCount::new(20).get(), 20);
        assert_eq!(CardCount::new(999).get(), 20);
        assert_eq!(CardCount::new(i64::MIN).get(), 1);
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(CardCount::parse("").get(), 1);
        assert_eq!(CardCount::parse("abc").get(), 1);
        assert_eq!(CardCount::parse("0").get(), 1);
        assert_eq!(CardCount::parse("-5").get(), 1);
        assert_eq!(CardCount::parse("  12  ").get(), 12);
        assert_eq!(CardCount::parse("+4").get(), 4);
        assert_eq!(CardCount::parse("3.9").get(), 3);
        assert_eq!(CardCount::parse("999").get(), 20);
        assert_eq!(CardCount::parse("99999999999999999999999").get(), 20);
        assert_eq!(CardCount::parse("-").get(), 1);
    }

    #[test]
    fn test_generate_respects_count() {
        for (requested, expected) in [(0, 1), (-5, 1), (3, 3), (999, 20)] {
            let envelope = generate("credit", requested);
            assert_eq!(envelope.total, expected);
            assert_eq!(envelope.cards.len(), expected);
            assert_eq!(envelope.status, "success");
        }
    }

    #[test]
    fn test_every_prefix_and_length_validates() {
        let mut rng = seeded(1);
        for rule in BRAND_TABLE.iter() {
            for prefix in rule.prefixes {
                for &length in rule.valid_lengths {
                    let number = generate_card_with_rng(prefix, length, &mut rng);
                    assert_eq!(number.len(), length);
                    assert!(number.starts_with(prefix));
                    assert!(luhn::is_valid(&number), "{} should pass Luhn", number);
                }
            }
        }
    }

    #[test]
    fn test_card_fields() {
        let mut rng = seeded(42);
        for _ in 0..200 {
            let card = generate_synthetic_card(None, &mut rng);
            let rule = card.brand.rule();

            assert!(rule.matching_prefix(&card.number).is_some());
            assert!(rule.accepts_length(card.number.len()));
            assert!(luhn::is_valid(&card.number));
            assert!(card.test);

            let expected_cvv = if card.brand == CardBrand::AmericanExpress { 4 } else { 3 };
            assert_eq!(card.cvv.len(), expected_cvv);
            assert!(card.cvv.bytes().all(|b| b.is_ascii_digit()));
            assert!(!card.cvv.starts_with('0'));

            let (month, year) = card.expiry.split_once('/').unwrap();
            assert_eq!(month.len(), 2);
            assert!((1..=12).contains(&month.parse::<u32>().unwrap()));
            assert!(EXPIRY_YEARS.contains(&year.parse::<u32>().unwrap()));

            let (first, last) = card.holder_name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }

    #[test]
    fn test_forced_brand() {
        let mut rng = seeded(3);
        for brand in CardBrand::ALL {
            for _ in 0..20 {
                let card = generate_synthetic_card(Some(brand), &mut rng);
                assert_eq!(card.brand, brand);
                assert!(brand.rule().matching_prefix(&card.number).is_some());
            }
        }
    }

    #[test]
    fn test_random_brand_covers_table() {
        let mut rng = seeded(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(generate_synthetic_card(None, &mut rng).brand);
        }
        assert_eq!(seen.len(), BRAND_TABLE.len());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_with_rng("credit", CardCount::new(10), &mut seeded(77));
        let b = generate_with_rng("debit", CardCount::new(10), &mut seeded(77));
        // The card type hint has no effect on the output.
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic_with_prefix() {
        let card = generate_card_deterministic_with_prefix("411111", 16);
        assert!(card.starts_with("411111"));
        assert_eq!(card.len(), 16);
        assert!(luhn::is_valid(&card));
        assert_eq!(card, generate_card_deterministic_with_prefix("411111", 16));
    }

    #[test]
    #[should_panic(expected = "Prefix length must be less than total length")]
    fn test_prefix_too_long_panics() {
        generate_card_deterministic_with_prefix("4111", 4);
    }

    #[test]
    fn test_builder() {
        let envelope = CardGenerator::new("debit")
            .brand(CardBrand::Visa)
            .count(5)
            .generate_with(&mut seeded(5));
        assert_eq!(envelope.total, 5);
        assert!(envelope.cards.iter().all(|c| c.brand == CardBrand::Visa));
        assert!(envelope
            .cards
            .iter()
            .all(|c| c.number.len() == 13 || c.number.len() == 16));
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope = CardGenerator::new("credit")
            .brand(CardBrand::AmericanExpress)
            .generate_with(&mut seeded(11));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["total"], 1);
        assert_eq!(json["cards"][0]["brand"], "American Express");
        assert_eq!(json["cards"][0]["test"], true);
        assert_eq!(json["cards"][0]["number"].as_str().unwrap().len(), 15);
    }
}
