//! Error types for the fallible edges of the crate.
//!
//! Generation and validation themselves are total and never return an
//! error. Failures only come from interpreting caller-supplied names and
//! configuration values.

use std::fmt;

/// Errors raised while interpreting caller input outside the core
/// generate/validate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// A brand name did not match any entry in the brand table.
    UnknownBrand {
        /// The name as supplied by the caller.
        name: String,
    },

    /// A configuration value could not be interpreted.
    InvalidConfig {
        /// The setting that was being read (e.g. `PORT`).
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBrand { name } => {
                write!(
                    f,
                    "unknown card brand '{}' (expected one of: {})",
                    name.escape_default(),
                    crate::CardBrand::ALL
                        .iter()
                        .map(|b| b.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }

            Self::InvalidConfig { key, value } => {
                write!(f, "invalid value '{}' for {}", value.escape_default(), key)
            }
        }
    }
}

impl std::error::Error for CardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CardError::UnknownBrand {
            name: "unionpay".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown card brand 'unionpay' (expected one of: American Express, Diners Club, \
             Discover, InstaPayment, JCB, Maestro, MasterCard, Visa, Visa Electron)"
        );

        assert_eq!(
            CardError::InvalidConfig {
                key: "PORT",
                value: "eighty".to_string()
            }
            .to_string(),
            "invalid value 'eighty' for PORT"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardError>();
    }
}
