//! Card brand detection by BIN/IIN prefix.
//!
//! Detection walks [`BRAND_TABLE`] in declaration order and, within each
//! entry, its prefixes in declaration order. The first prefix the number
//! starts with decides the brand, so "54" resolves to Diners Club before
//! MasterCard and "4" resolves to Visa before any Visa Electron prefix.

use crate::card::{BrandRule, CardBrand, BRAND_TABLE};

/// How detection treats the digit count of a prefix match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthPolicy {
    /// A prefix match is accepted whatever the number's length.
    #[default]
    PrefixOnly,
    /// A prefix match is accepted only if the number's length is one of the
    /// entry's valid lengths; otherwise scanning continues with later entries.
    LengthAware,
}

/// Detects the card brand of a digit string by prefix alone.
///
/// # Example
///
/// ```
/// use cardlab::detect::detect_brand;
/// use cardlab::CardBrand;
///
/// assert_eq!(detect_brand("4111111111111111"), Some(CardBrand::Visa));
/// assert_eq!(detect_brand("378282246310005"), Some(CardBrand::AmericanExpress));
/// assert_eq!(detect_brand("1234567890123"), None);
/// ```
#[inline]
pub fn detect_brand(digits: &str) -> Option<CardBrand> {
    detect_brand_with(digits, LengthPolicy::PrefixOnly)
}

/// Detects the card brand of a digit string under the given length policy.
///
/// ```
/// use cardlab::detect::{detect_brand_with, LengthPolicy};
/// use cardlab::CardBrand;
///
/// // 19 digits: Visa only allows 13 or 16.
/// let long = "4111111111111111111";
/// assert_eq!(detect_brand_with(long, LengthPolicy::PrefixOnly), Some(CardBrand::Visa));
/// assert_eq!(detect_brand_with(long, LengthPolicy::LengthAware), None);
/// ```
pub fn detect_brand_with(digits: &str, policy: LengthPolicy) -> Option<CardBrand> {
    if digits.is_empty() {
        return None;
    }

    let rule = BRAND_TABLE
        .iter()
        .find(|rule| rule_matches(rule, digits, policy))?;

    tracing::trace!(brand = rule.brand.name(), ?policy, "brand detected");
    Some(rule.brand)
}

fn rule_matches(rule: &BrandRule, digits: &str, policy: LengthPolicy) -> bool {
    if rule.matching_prefix(digits).is_none() {
        return false;
    }

    match policy {
        LengthPolicy::PrefixOnly => !rule.valid_lengths.is_empty(),
        LengthPolicy::LengthAware => rule.accepts_length(digits.len()),
    }
}
