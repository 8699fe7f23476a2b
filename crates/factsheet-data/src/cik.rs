//! Central Index Key (CIK) normalization.
//!
//! The SEC identifies every filer by a numeric CIK. Its APIs expect the number
//! as a 10-character, zero-padded decimal string, e.g. `0000320193` for Apple.
//! [`Cik`] guarantees that form: it can only be constructed through the
//! normalizing constructors below.

use crate::error::{DataError, Result};
use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

/// Number of characters in a canonical CIK.
pub const CIK_WIDTH: usize = 10;

/// Largest number that still fits in [`CIK_WIDTH`] digits.
const CIK_MAX: u64 = 9_999_999_999;

/// A normalized 10-digit CIK.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct Cik(String);

impl Cik {
    /// Normalize a textual identifier.
    ///
    /// Accepts plain digits with or without leading zeros, as well as
    /// float-formatted integers such as `"320193.0"` (which is what a numeric
    /// spreadsheet column often turns into once stringified).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidCik`] if the value is empty, not a
    /// non-negative integer, or has more than 10 significant digits.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        let integral = match trimmed.split_once('.') {
            Some((int, frac)) if frac.bytes().all(|b| b == b'0') => int,
            Some(_) => return Err(DataError::InvalidCik(raw.to_string())),
            None => trimmed,
        };

        if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidCik(raw.to_string()));
        }

        let significant = integral.trim_start_matches('0');
        if significant.len() > CIK_WIDTH {
            return Err(DataError::InvalidCik(raw.to_string()));
        }

        Ok(Self(format!("{:0>width$}", significant, width = CIK_WIDTH)))
    }

    /// Normalize an integer identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidCik`] if the number needs more than 10 digits.
    pub fn from_number(value: u64) -> Result<Self> {
        if value > CIK_MAX {
            return Err(DataError::InvalidCik(value.to_string()));
        }
        Ok(Self(format!("{:0>width$}", value, width = CIK_WIDTH)))
    }

    /// Normalize a floating point identifier, as produced by spreadsheet cells.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidCik`] for negative, fractional, non-finite or
    /// out-of-range values.
    pub fn from_float(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > CIK_MAX as f64 {
            return Err(DataError::InvalidCik(value.to_string()));
        }
        Self::from_number(value as u64)
    }

    /// The canonical 10-digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cik {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cik {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("320193", "0000320193")]
    #[case("0000320193", "0000320193")]
    #[case("320193.0", "0000320193")]
    #[case("  789019 ", "0000789019")]
    #[case("1018724.", "0001018724")]
    #[case("000000000001318605", "0001318605")]
    #[case("1234567890", "1234567890")]
    fn test_parse_normalizes(#[case] raw: &str, #[case] expected: &str) {
        let cik = Cik::parse(raw).unwrap();
        assert_eq!(cik.as_str(), expected);
        assert_eq!(cik.as_str().len(), CIK_WIDTH);
        assert!(cik.as_str().bytes().all(|b| b.is_ascii_digit()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("AAPL")]
    #[case("-320193")]
    #[case("320193.5")]
    #[case("12345678901")]
    #[case("3.2e5")]
    fn test_parse_rejects(#[case] raw: &str) {
        assert!(matches!(Cik::parse(raw), Err(DataError::InvalidCik(_))));
    }

    #[test]
    fn test_leading_zeros_collapse() {
        assert_eq!(Cik::parse("320193").unwrap(), Cik::parse("0000320193").unwrap());
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Cik::from_number(320193).unwrap().as_str(), "0000320193");
        assert!(Cik::from_number(10_000_000_000).is_err());
    }

    #[test]
    fn test_from_float() {
        assert_eq!(Cik::from_float(320193.0).unwrap().as_str(), "0000320193");
        assert!(Cik::from_float(320193.25).is_err());
        assert!(Cik::from_float(-1.0).is_err());
        assert!(Cik::from_float(f64::NAN).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let cik: Cik = "320193".parse().unwrap();
        assert_eq!(cik.to_string(), "0000320193");
    }
}
