//! Cart line quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`] from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is empty.
    #[error("quantity cannot be empty")]
    Empty,
    /// The input is not a whole number (e.g. `1.5`, `NaN`, `inf`, `two`).
    #[error("quantity must be a whole number (got {0:?})")]
    NotAnInteger(String),
    /// The input is a whole number but does not fit.
    #[error("quantity is out of range (got {0})")]
    OutOfRange(String),
}

/// A positive item count, never zero.
///
/// # Examples
///
/// ```
/// use luxelane_core::Quantity;
///
/// assert_eq!(Quantity::at_least_one(-3).unwrap().get(), 1);
/// assert!(Quantity::at_least_one(i64::from(u32::MAX) + 1).is_none());
/// assert_eq!(Quantity::parse("4").unwrap(), 4);
/// assert!(Quantity::parse("1.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Create a quantity from a requested count, raising anything below 1
    /// to 1. Returns `None` if the count does not fit in a `u32`.
    #[must_use]
    pub fn at_least_one(requested: i64) -> Option<Self> {
        u32::try_from(requested.max(1)).ok().and_then(Self::new)
    }

    /// Parse a quantity typed by a user.
    ///
    /// Accepts a signed whole number. Returns the signed value so callers can
    /// decide what zero or negative input means (clamp, remove, reject).
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, anything that is not a whole number,
    /// and integers outside the `i64` range.
    pub fn parse_requested(s: &str) -> Result<i64, QuantityError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }

        let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QuantityError::NotAnInteger(trimmed.to_owned()));
        }

        trimmed
            .parse::<i64>()
            .map_err(|_| QuantityError::OutOfRange(trimmed.to_owned()))
    }

    /// Parse a strictly positive quantity typed by a user.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse_requested`], plus [`QuantityError::OutOfRange`]
    /// for zero, negative, or too-large values.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let requested = Self::parse_requested(s)?;
        u32::try_from(requested)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| QuantityError::OutOfRange(s.trim().to_owned()))
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add another quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0.get()) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl PartialEq<u32> for Quantity {
    fn eq(&self, other: &u32) -> bool {
        self.get() == *other
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
