//! Fuzz target for card validation.
//!
//! Tests that validate() never panics on arbitrary input.

#![no_main]

use cardlab::{detect_brand_with, mask, passes_luhn, validate, LengthPolicy, ValidationOutcome};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic, regardless of input
    let outcome = validate(data);
    let passed = passes_luhn(data);
    assert_eq!(outcome.luhn_passed(), passed);

    if let ValidationOutcome::Report(report) = &outcome {
        let _ = detect_brand_with(&report.input_digits, LengthPolicy::LengthAware);
        let masked = mask::mask_pan(&report.input_digits);
        assert_eq!(masked.len(), report.input_digits.len());
    }

    let _ = serde_json::to_string(&outcome);
});
