//! Card networks and the static brand table.
//!
//! `BRAND_TABLE` drives both generation (which prefixes and lengths a brand
//! may produce) and detection (which brand a number's prefix belongs to).
//! Its declaration order decides ties between overlapping prefixes, so
//! entries must not be reordered.

use crate::error::CardError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported card networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum CardBrand {
    /// American Express - Prefix 34, 37, length 15
    #[serde(rename = "American Express")]
    AmericanExpress,
    /// Diners Club - Prefix 300-305, 36, 54, length 14 or 16
    #[serde(rename = "Diners Club")]
    DinersClub,
    /// Discover - Prefix 6011, 644-649, 65, length 16
    Discover,
    /// InstaPayment - Prefix 637-639, length 16
    InstaPayment,
    /// JCB - Prefix 3528, 3529, 3530, 3589, length 16
    #[serde(rename = "JCB")]
    Jcb,
    /// Maestro - various 50xx/58xx/63xx/67xx prefixes, length 16-19
    Maestro,
    /// MasterCard - Prefix 51-55, length 16
    MasterCard,
    /// Visa - Prefix 4, length 13 or 16
    Visa,
    /// Visa Electron - Prefix 4026, 417500, 4508, 4844, 4913, 4917, length 16
    #[serde(rename = "Visa Electron")]
    VisaElectron,
}

impl CardBrand {
    /// Every brand, in brand table order.
    pub const ALL: [CardBrand; 9] = [
        Self::AmericanExpress,
        Self::DinersClub,
        Self::Discover,
        Self::InstaPayment,
        Self::Jcb,
        Self::Maestro,
        Self::MasterCard,
        Self::Visa,
        Self::VisaElectron,
    ];

    /// Returns the display name used in reports and JSON output.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AmericanExpress => "American Express",
            Self::DinersClub => "Diners Club",
            Self::Discover => "Discover",
            Self::InstaPayment => "InstaPayment",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::MasterCard => "MasterCard",
            Self::Visa => "Visa",
            Self::VisaElectron => "Visa Electron",
        }
    }

    /// Returns this brand's entry in [`BRAND_TABLE`].
    #[inline]
    pub fn rule(&self) -> &'static BrandRule {
        // ALL and BRAND_TABLE share the same order.
        &BRAND_TABLE[*self as usize]
    }

    /// Number of CVV digits printed on cards of this brand.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::AmericanExpress => 4,
            _ => 3,
        }
    }

    /// Returns true if the given length is valid for this brand.
    #[inline]
    pub fn is_valid_length(&self, length: usize) -> bool {
        self.rule().accepts_length(length)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CardBrand {
    type Err = CardError;

    /// Parses a brand name, ignoring case, spaces, hyphens and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "americanexpress" | "amex" => Ok(Self::AmericanExpress),
            "dinersclub" | "diners" => Ok(Self::DinersClub),
            "discover" => Ok(Self::Discover),
            "instapayment" => Ok(Self::InstaPayment),
            "jcb" => Ok(Self::Jcb),
            "maestro" => Ok(Self::Maestro),
            "mastercard" | "mc" => Ok(Self::MasterCard),
            "visa" => Ok(Self::Visa),
            "visaelectron" | "electron" => Ok(Self::VisaElectron),
            _ => Err(CardError::UnknownBrand {
                name: s.to_string(),
            }),
        }
    }
}

/// Static prefix and length options for one card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandRule {
    /// The network this rule describes.
    pub brand: CardBrand,
    /// Leading digit strings that identify the network, in match order.
    pub prefixes: &'static [&'static str],
    /// Accepted total digit counts.
    pub valid_lengths: &'static [usize],
}

impl BrandRule {
    /// Returns the first prefix of this rule that `digits` starts with.
    #[inline]
    pub fn matching_prefix(&self, digits: &str) -> Option<&'static str> {
        self.prefixes.iter().copied().find(|p| digits.starts_with(p))
    }

    /// Returns true if `length` is one of this rule's valid lengths.
    #[inline]
    pub fn accepts_length(&self, length: usize) -> bool {
        self.valid_lengths.contains(&length)
    }
}

/// The brand table, in match-precedence order.
pub static BRAND_TABLE: [BrandRule; 9] = [
    BrandRule {
        brand: CardBrand::AmericanExpress,
        prefixes: &["34", "37"],
        valid_lengths: &[15],
    },
    BrandRule {
        brand: CardBrand::DinersClub,
        prefixes: &["300", "301", "302", "303", "304", "305", "36", "54"],
        valid_lengths: &[14, 16],
    },
    BrandRule {
        brand: CardBrand::Discover,
        prefixes: &["6011", "644", "645", "646", "647", "648", "649", "65"],
        valid_lengths: &[16],
    },
    BrandRule {
        brand: CardBrand::InstaPayment,
        prefixes: &["637", "638", "639"],
        valid_lengths: &[16],
    },
    BrandRule {
        brand: CardBrand::Jcb,
        prefixes: &["3528", "3529", "3530", "3589"],
        valid_lengths: &[16],
    },
    BrandRule {
        brand: CardBrand::Maestro,
        prefixes: &[
            "5018", "5020", "5038", "5893", "6304", "6759", "6761", "6762", "6763",
        ],
        valid_lengths: &[16, 17, 18, 19],
    },
    BrandRule {
        brand: CardBrand::MasterCard,
        prefixes: &["51", "52", "53", "54", "55"],
        valid_lengths: &[16],
    },
    BrandRule {
        brand: CardBrand::Visa,
        prefixes: &["4"],
        valid_lengths: &[13, 16],
    },
    BrandRule {
        brand: CardBrand::VisaElectron,
        prefixes: &["4026", "417500", "4508", "4844", "4913", "4917"],
        valid_lengths: &[16],
    },
];
