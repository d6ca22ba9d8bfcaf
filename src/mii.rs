//! Major Industry Identifier (MII) lookup.
//!
//! The MII is the first digit of a card number and broadly classifies the
//! issuing industry. Every digit 0-9 has a category.

use std::fmt;

/// Industry category encoded by a card number's leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorIndustry {
    /// 0
    IsoTc68,
    /// 1
    Airlines,
    /// 2
    AirlinesAndFuture,
    /// 3
    TravelAndEntertainment,
    /// 4 and 5
    BankingAndFinancial,
    /// 6
    MerchandisingAndBanking,
    /// 7
    Petroleum,
    /// 8
    HealthcareAndTelecom,
    /// 9
    NationalAssignment,
}

impl MajorIndustry {
    /// Maps a digit value (0-9) to its category.
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::IsoTc68),
            1 => Some(Self::Airlines),
            2 => Some(Self::AirlinesAndFuture),
            3 => Some(Self::TravelAndEntertainment),
            4 | 5 => Some(Self::BankingAndFinancial),
            6 => Some(Self::MerchandisingAndBanking),
            7 => Some(Self::Petroleum),
            8 => Some(Self::HealthcareAndTelecom),
            9 => Some(Self::NationalAssignment),
            _ => None,
        }
    }

    /// Classifies a digit string by its first character.
    ///
    /// ```
    /// use cardlab::mii::MajorIndustry;
    ///
    /// let mii = MajorIndustry::from_leading("4111111111111111").unwrap();
    /// assert_eq!(mii.description(), "Banking and financial");
    /// assert_eq!(MajorIndustry::from_leading(""), None);
    /// ```
    pub fn from_leading(digits: &str) -> Option<Self> {
        let first = *digits.as_bytes().first()?;
        if !first.is_ascii_digit() {
            return None;
        }
        Self::from_digit(first - b'0')
    }

    /// Human-readable category, as shown in validation reports.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::IsoTc68 => "ISO/TC 68 and other future industry assignments",
            Self::Airlines => "Airlines",
            Self::AirlinesAndFuture => "Airlines and other future industry assignments",
            Self::TravelAndEntertainment => "Travel and entertainment",
            Self::BankingAndFinancial => "Banking and financial",
            Self::MerchandisingAndBanking => "Merchandising and banking/financial",
            Self::Petroleum => "Petroleum",
            Self::HealthcareAndTelecom => "Healthcare, telecommunications",
            Self::NationalAssignment => "National assignment",
        }
    }
}

impl fmt::Display for MajorIndustry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
