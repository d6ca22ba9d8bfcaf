//! Card number validation and classification.
//!
//! [`validate`] is total: every input string yields a report. Input with no
//! digits at all gets the short [`NoDigitsReport`]; everything else gets a
//! full [`ValidationReport`] whether or not the Luhn check passes.

use crate::detect::detect_brand;
use crate::luhn;
use crate::mask::{mask_pan, VISIBLE_HEAD};
use crate::mii::MajorIndustry;
use serde::Serialize;

/// Placeholder for fields that cannot be determined.
pub const NOT_APPLICABLE: &str = "N/A";

/// Message carried by [`NoDigitsReport`].
pub const NO_DIGITS_MESSAGE: &str = "invalid number (no digits)";

/// Outcome of Luhn validation, as shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum LuhnStatus {
    /// Checksum is a multiple of 10.
    Passed,
    /// Checksum is not a multiple of 10.
    Failed,
}

impl LuhnStatus {
    fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

/// Full classification of a card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ValidationReport {
    /// Mirrors the Luhn result.
    pub success: bool,
    /// The input with every non-digit character removed.
    pub input_digits: String,
    /// Luhn check result.
    pub luhn: LuhnStatus,
    /// Matched brand name, or `"N/A"`.
    pub brand: String,
    /// Major Industry Identifier category of the leading digit.
    pub mii: String,
    /// First 6 digits, or `"N/A"` for shorter input.
    pub bin: String,
    /// BIN and last 4 digits visible, the rest masked; `"N/A"` for short input.
    pub masked_number: String,
    /// Last digit of the cleaned input.
    pub checksum_digit: String,
    /// Always `"N/A"`; no issuer database is consulted.
    pub bank_name: String,
    /// Always `"N/A"`; no issuer database is consulted.
    pub bank_country: String,
}

impl ValidationReport {
    /// Returns true if the number passed the Luhn check.
    #[inline]
    pub fn luhn_passed(&self) -> bool {
        self.luhn == LuhnStatus::Passed
    }
}

/// Report for input that contained no digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct NoDigitsReport {
    /// Always false.
    pub success: bool,
    /// Explanation of the failure.
    pub message: String,
}

impl Default for NoDigitsReport {
    fn default() -> Self {
        Self {
            success: false,
            message: NO_DIGITS_MESSAGE.to_string(),
        }
    }
}

/// Either report shape produced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationOutcome {
    /// The input contained no digits.
    NoDigits(NoDigitsReport),
    /// The input was classified.
    Report(ValidationReport),
}

impl ValidationOutcome {
    /// Returns true if the input had digits and passed the Luhn check.
    #[inline]
    pub fn luhn_passed(&self) -> bool {
        match self {
            Self::NoDigits(_) => false,
            Self::Report(report) => report.luhn_passed(),
        }
    }

    /// Returns the full report, if the input had digits.
    #[inline]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::NoDigits(_) => None,
            Self::Report(report) => Some(report),
        }
    }
}

/// Removes every character that is not an ASCII digit.
///
/// ```
/// use cardlab::validate::clean_digits;
///
/// assert_eq!(clean_digits("4111-1111 1111.1111"), "4111111111111111");
/// assert_eq!(clean_digits("abcd"), "");
/// ```
pub fn clean_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates and classifies an arbitrary string as a card number.
///
/// # Example
///
/// ```
/// use cardlab::validate;
///
/// let outcome = validate("4111 1111 1111 1111");
/// let report = outcome.report().unwrap();
/// assert!(report.success);
/// assert_eq!(report.brand, "Visa");
/// assert_eq!(report.bin, "411111");
/// assert_eq!(report.masked_number, "411111******1111");
///
/// assert!(validate("no digits here").report().is_none());
/// ```
pub fn validate(input: &str) -> ValidationOutcome {
    let digits = clean_digits(input);
    let Some(&last) = digits.as_bytes().last() else {
        tracing::debug!("validation input contained no digits");
        return ValidationOutcome::NoDigits(NoDigitsReport::default());
    };

    let passed = luhn::is_valid(&digits);
    let brand = detect_brand(&digits).map_or(NOT_APPLICABLE, |b| b.name());
    let mii = MajorIndustry::from_leading(&digits).map_or(NOT_APPLICABLE, |m| m.description());

    let (bin, masked_number) = if digits.len() >= VISIBLE_HEAD {
        (digits[..VISIBLE_HEAD].to_string(), mask_pan(&digits))
    } else {
        (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
    };

    tracing::debug!(
        masked = %masked_number,
        brand,
        luhn = passed,
        "validated card number"
    );

    ValidationOutcome::Report(ValidationReport {
        success: passed,
        luhn: LuhnStatus::from_passed(passed),
        brand: brand.to_string(),
        mii: mii.to_string(),
        bin,
        masked_number,
        checksum_digit: (last as char).to_string(),
        bank_name: NOT_APPLICABLE.to_string(),
        bank_country: NOT_APPLICABLE.to_string(),
        input_digits: digits,
    })
}

/// Quickly checks whether the digits of `input` pass the Luhn check.
///
/// Non-digit characters are ignored; input without digits fails.
///
/// ```
/// use cardlab::passes_luhn;
///
/// assert!(passes_luhn("4111-1111-1111-1111"));
/// assert!(!passes_luhn("4111-1111-1111-1112"));
/// assert!(!passes_luhn("----"));
/// ```
#[inline]
pub fn passes_luhn(input: &str) -> bool {
    luhn::is_valid(&clean_digits(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(input: &str) -> ValidationReport {
        validate(input).report().cloned().expect("input has digits")
    }

    #[test]
    fn test_visa_test_number() {
        let r = report("4111111111111111");
        assert_eq!(r.input_digits, "4111111111111111");
        assert!(r.success);
        assert_eq!(r.luhn, LuhnStatus::Passed);
        assert_eq!(r.brand, "Visa");
        assert_eq!(r.mii, "Banking and financial");
        assert_eq!(r.bin, "411111");
        assert_eq!(r.masked_number, "411111******1111");
        assert_eq!(r.checksum_digit, "1");
        assert_eq!(r.bank_name, NOT_APPLICABLE);
        assert_eq!(r.bank_country, NOT_APPLICABLE);
    }

    #[test]
    fn test_arbitrary_invalid_number() {
        let r = report("1234567890123");
        assert!(!r.success);
        assert_eq!(r.luhn, LuhnStatus::Failed);
        assert_eq!(r.brand, NOT_APPLICABLE);
        assert_eq!(r.mii, "Airlines");
        assert_eq!(r.bin, "123456");
        assert_eq!(r.masked_number, "123456***0123");
        assert_eq!(r.checksum_digit, "3");
    }

    #[test]
    fn test_brand_reported_even_when_luhn_fails() {
        let r = report("4111111111111112");
        assert!(!r.success);
        assert_eq!(r.brand, "Visa");
    }

    #[test]
    fn test_no_digits() {
        for input in ["", "abcd", "----", "   "] {
            let outcome = validate(input);
            assert_eq!(outcome, ValidationOutcome::NoDigits(NoDigitsReport::default()));
            assert!(!outcome.luhn_passed());
            assert!(outcome.report().is_none());
        }
    }

    #[test]
    fn test_strips_any_non_digit() {
        let r = report("card: 4111-1111/1111 1111 (test)");
        assert_eq!(r.input_digits, "4111111111111111");
        assert!(r.success);
    }

    #[test]
    fn test_short_inputs() {
        let r = report("42");
        assert_eq!(r.bin, NOT_APPLICABLE);
        assert_eq!(r.masked_number, NOT_APPLICABLE);
        assert_eq!(r.checksum_digit, "2");
        assert_eq!(r.brand, "Visa");

        let r = report("0");
        assert!(r.success);
        assert_eq!(r.mii, "ISO/TC 68 and other future industry assignments");

        let r = report("123456");
        assert_eq!(r.bin, "123456");
        assert_eq!(r.masked_number, "123456");
    }

    #[test]
    fn test_json_shapes() {
        let json = serde_json::to_value(validate("4111111111111111")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["luhn"], "Passed");
        assert_eq!(json["brand"], "Visa");
        assert_eq!(json["masked_number"], "411111******1111");

        let json = serde_json::to_value(validate("")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], NO_DIGITS_MESSAGE);
        assert!(json.get("bin").is_none());
    }

    #[test]
    fn test_passes_luhn() {
        assert!(passes_luhn("4111111111111111"));
        assert!(passes_luhn("3782 822463 10005"));
        assert!(!passes_luhn("4111111111111112"));
        assert!(!passes_luhn(""));
    }
}
