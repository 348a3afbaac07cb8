//! Type-safe price representation using decimal arithmetic.
//!
//! All LuxeLane prices are US dollars. Amounts are stored exactly as
//! [`Decimal`] values and only rounded to cents for display and tax.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("price must be a number (got {0:?})")]
    NotANumber(String),
}

/// A non-negative amount of money in US dollars.
///
/// Serializes as the bare decimal. Stored catalogs written with JSON numbers
/// (`349.99`) and strings (`"349.99"`) both deserialize.
///
/// # Examples
///
/// ```
/// use luxelane_core::Price;
///
/// let price = Price::from_cents(129_999);
/// assert_eq!(price.to_string(), "$1,299.99");
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(Decimal::from_parts(cents, 0, 0, false, 2))
    }

    /// Parse a price from user input such as `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric input and
    /// [`PriceError::Negative`] for amounts below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed)
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by an item quantity.
    ///
    /// Saturates at [`Decimal::MAX`] instead of panicking.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Multiply by a non-negative rate (e.g. a tax rate), rounding to cents.
    #[must_use]
    pub fn scaled_by(self, rate: Decimal) -> Self {
        let scaled = self.0.saturating_mul(rate.abs());
        Self(scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Round to whole cents (half away from zero).
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    /// Formats as US currency with thousands separators, e.g. `$1,299.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let text = format!("{rounded:.2}");
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "${grouped}.{cents}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Price::parse(" 19.99 ").unwrap(), Price::from_cents(1999));
        assert!(matches!(
            Price::parse("abc"),
            Err(PriceError::NotANumber(_))
        ));
        assert!(matches!(Price::parse(""), Err(PriceError::NotANumber(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::from_cents(7999).to_string(), "$79.99");
        assert_eq!(Price::from_cents(129_999).to_string(), "$1,299.99");
        assert_eq!(Price::from_cents(123_456_789).to_string(), "$1,234,567.89");
        assert_eq!(Price::parse("10").unwrap().to_string(), "$10.00");
    }

    #[test]
    fn test_times_and_sum() {
        let price = Price::from_cents(34999);
        assert_eq!(price.times(3), Price::from_cents(104_997));

        let total: Price = [Price::from_cents(100), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(350));
    }

    #[test]
    fn test_scaled_by_rounds_to_cents() {
        let rate = Decimal::new(8, 2);
        // 8% of 349.99 = 27.9992
        assert_eq!(
            Price::from_cents(34999).scaled_by(rate),
            Price::from_cents(2800)
        );
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("349.99").unwrap();
        let from_string: Price = serde_json::from_str("\"349.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(34999));
        assert_eq!(from_string, Price::from_cents(34999));

        let negative: Result<Price, _> = serde_json::from_str("-5");
        assert!(negative.is_err());
    }
}
