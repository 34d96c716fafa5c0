//! Exact decimal cost type.
//!
//! Uses `rust_decimal` so that per-drug sums are exact until the single
//! rounding step at finalization.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// A prescription cost, kept exact while it accumulates.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use pharmacy_counting::Cost;
///
/// let a = Cost::from_str("100.2").unwrap();
/// let b = Cost::from_str("100.3").unwrap();
/// let total = a.checked_add(b).unwrap();
/// assert_eq!(total.to_string(), "200.5");
/// assert_eq!(total.round_half_even(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Cost(Decimal);

impl Cost {
    /// Rounds to the nearest integer, ties to even.
    ///
    /// Values outside the `i64` range saturate.
    pub fn round_half_even(&self) -> i64 {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Adds two costs, returning `None` if the sum leaves the `Decimal` range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Cost)
    }

    /// Adds two costs, clamping at `Decimal::MAX` or `Decimal::MIN`.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl FromStr for Cost {
    type Err = rust_decimal::Error;

    /// Accepts plain decimals and scientific notation, ignoring surrounding whitespace.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = match Decimal::from_str(trimmed) {
            Ok(decimal) => decimal,
            Err(plain_err) => Decimal::from_scientific(trimmed).map_err(|_| plain_err)?,
        };
        Ok(Cost(decimal))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
