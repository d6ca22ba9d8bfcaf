//! Luhn (mod 10) checksum, shared by the synthesizer and the validator.
//!
//! The slice forms (`validate`, `compute_checksum`, `generate_check_digit`)
//! work on digit values 0-9. The string forms (`is_valid`,
//! `compute_check_digit`) accept ASCII digit strings and refuse anything else.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a full number (check digit included) given as digit values.
///
/// # Example
///
/// ```
/// use cardlab::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) of a full number.
///
/// The rightmost digit is position 0 and is kept as-is; odd positions
/// are doubled.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Computes the check digit to append to `body`.
///
/// The body's rightmost digit lands at position 1 once the check digit is
/// appended, so doubling starts there rather than one step later.
///
/// ```
/// use cardlab::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Converts an ASCII digit string into digit values.
///
/// Returns `None` if any character is not `0`-`9`.
pub fn parse_digits(input: &str) -> Option<Vec<u8>> {
    input
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Checks a digit string against the Luhn checksum.
///
/// Empty input or input with any non-digit character is rejected.
///
/// ```
/// use cardlab::luhn::is_valid;
///
/// assert!(is_valid("4111111111111111"));
/// assert!(!is_valid("4111-1111-1111-1111"));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(digits: &str) -> bool {
    parse_digits(digits).is_some_and(|d| validate(&d))
}

/// Computes the check digit for a digit string body.
///
/// Returns `None` if `body` contains a non-digit character.
pub fn compute_check_digit(body: &str) -> Option<u8> {
    parse_digits(body).map(|d| generate_check_digit(&d))
}
