//! # cardlab
//!
//! Synthetic test credit cards and card number classification.
//!
//! ## Features
//!
//! - Luhn checksum validation and check digit computation
//! - Test card generation per brand, with holder name, CVV and expiry
//! - Brand detection from an ordered BIN prefix table
//! - Major Industry Identifier (MII) classification
//! - PAN masking for display
//! - Library, CLI and REST API interfaces
//!
//! ## Quick Start
//!
//! ```rust
//! use cardlab::{generate, validate};
//!
//! // Generate three test cards
//! let envelope = generate("credit", 3);
//! assert_eq!(envelope.total, 3);
//!
//! // Classify a number
//! let outcome = validate("4111-1111-1111-1111");
//! let report = outcome.report().unwrap();
//! assert!(report.success);
//! assert_eq!(report.brand, "Visa");
//! assert_eq!(report.mii, "Banking and financial");
//! assert_eq!(report.masked_number, "411111******1111");
//! ```
//!
//! ## Generated Cards Validate
//!
//! ```rust
//! use cardlab::{generate, validate};
//!
//! for card in generate("debit", 20).cards {
//!     let report = validate(&card.number);
//!     assert!(report.luhn_passed());
//! }
//! ```
//!
//! ## Supported Card Brands
//!
//! Detection order is table order; the first matching prefix wins.
//!
//! | Brand | Prefixes | Lengths | CVV |
//! |-------|----------|---------|-----|
//! | American Express | 34, 37 | 15 | 4 |
//! | Diners Club | 300-305, 36, 54 | 14, 16 | 3 |
//! | Discover | 6011, 644-649, 65 | 16 | 3 |
//! | InstaPayment | 637-639 | 16 | 3 |
//! | JCB | 3528, 3529, 3530, 3589 | 16 | 3 |
//! | Maestro | 5018, 5020, 5038, 5893, 6304, 6759, 6761-6763 | 16-19 | 3 |
//! | MasterCard | 51-55 | 16 | 3 |
//! | Visa | 4 | 13, 16 | 3 |
//! | Visa Electron | 4026, 417500, 4508, 4844, 4913, 4917 | 16 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//!
//! Generated numbers only satisfy the Luhn checksum. They are not issued
//! by any bank and cannot be used for payments.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod detect;
pub mod error;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod mii;
pub mod validate;

// Re-export main types at crate root
pub use card::{BrandRule, CardBrand, BRAND_TABLE};
pub use detect::{detect_brand, detect_brand_with, LengthPolicy};
pub use error::CardError;
pub use generate::{
    generate, generate_with_rng, CardCount, CardGenerator, GenerationEnvelope, SyntheticCard,
};
pub use mii::MajorIndustry;
pub use validate::{
    passes_luhn, validate, LuhnStatus, NoDigitsReport, ValidationOutcome, ValidationReport,
    NOT_APPLICABLE,
};
