//! PAN masking for display.
//!
//! The BIN (first 6 digits) and the last 4 digits stay visible; every digit
//! strictly between them is replaced by [`MASK_CHAR`].

/// Character substituted for hidden digits.
pub const MASK_CHAR: char = '*';

/// Number of leading digits left visible (the BIN).
pub const VISIBLE_HEAD: usize = 6;

/// Number of trailing digits left visible.
pub const VISIBLE_TAIL: usize = 4;

/// Masks a cleaned digit string, keeping the BIN and the last 4 digits.
///
/// Input of 4 digits or fewer is returned unchanged. When the two visible
/// windows overlap (10 digits or fewer) nothing is hidden.
///
/// # Example
///
/// ```
/// use cardlab::mask::mask_pan;
///
/// assert_eq!(mask_pan("4111111111111111"), "411111******1111");
/// assert_eq!(mask_pan("378282246310005"), "378282*****0005");
/// assert_eq!(mask_pan("1234"), "1234");
/// ```
pub fn mask_pan(digits: &str) -> String {
    let len = digits.chars().count();
    if len <= VISIBLE_TAIL {
        return digits.to_string();
    }

    let tail_start = len - VISIBLE_TAIL;
    digits
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < VISIBLE_HEAD || i >= tail_start {
                c
            } else {
                MASK_CHAR
            }
        })
        .collect()
}

/// Number of characters [`mask_pan`] hides for an input of `len` digits.
#[inline]
pub const fn masked_count(len: usize) -> usize {
    len.saturating_sub(VISIBLE_HEAD + VISIBLE_TAIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_pan("4111111111111111"), "411111******1111");
    }

    #[test]
    fn test_mask_19_digits() {
        assert_eq!(mask_pan("5018123456789012345"), "501812*********2345");
    }

    #[test]
    fn test_mask_13_digits() {
        assert_eq!(mask_pan("4222222222222"), "422222***2222");
    }

    #[test]
    fn test_short_inputs_unmasked() {
        assert_eq!(mask_pan(""), "");
        assert_eq!(mask_pan("1"), "1");
        assert_eq!(mask_pan("1234"), "1234");
    }

    #[test]
    fn test_overlapping_windows() {
        assert_eq!(mask_pan("12345"), "12345");
        assert_eq!(mask_pan("12345678"), "12345678");
        assert_eq!(mask_pan("1234567890"), "1234567890");
        assert_eq!(mask_pan("12345678901"), "123456*8901");
    }

    #[test]
    fn test_masked_count() {
        for input in ["4111111111111111", "4222222222222", "12345678", "12"] {
            let hidden = mask_pan(input).chars().filter(|&c| c == MASK_CHAR).count();
            assert_eq!(hidden, masked_count(input.len()));
        }
    }
}
