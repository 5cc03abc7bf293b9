//! Exact rational arithmetic for scale factors and thresholds.
//!
//! Placement decisions compare scale factors against configured thresholds
//! with strict inequalities. Floating point rounds both sides, so a
//! screen/image ratio of 6/5 and a configured `1.2` may or may not compare
//! equal depending on how each was computed. Every factor is therefore kept
//! as a reduced numerator/denominator pair and compared by
//! cross-multiplication, which never rounds.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use super::error::EngineError;

/// An exact non-negative rational number.
///
/// Always stored in reduced form with a positive denominator, so derived
/// equality is value equality. Comparisons cross-multiply in 128-bit
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    num: u64,
    den: u64,
}

impl Ratio {
    /// Zero (`0/1`).
    pub const ZERO: Self = Self { num: 0, den: 1 };
    /// One (`1/1`).
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Creates the reduced ratio `numerator / denominator`.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. Internal callers derive denominators
    /// from validated [`Dimensions`](super::Dimensions) or literals; fallible
    /// input goes through [`Ratio::parse`] or [`Ratio::from_f64`] instead.
    #[must_use]
    pub fn new(numerator: u64, denominator: u64) -> Self {
        assert!(denominator != 0, "ratio denominator must be nonzero");
        Self::reduced(numerator, denominator)
    }

    /// Parses a non-negative decimal string such as `"1.2"` (giving 6/5).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRatio`] for empty, signed, non-decimal,
    /// or overflowing input.
    pub fn parse(input: &str) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidRatio {
            input: input.to_string(),
        };

        let (int_part, frac_part) = match input.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (input, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut num: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut den: u64 = 1;
        for digit in frac_part.bytes() {
            num = num
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(digit - b'0')))
                .ok_or_else(invalid)?;
            den = den.checked_mul(10).ok_or_else(invalid)?;
        }

        Ok(Self::reduced(num, den))
    }

    /// Converts a finite non-negative float through its shortest round-trip
    /// decimal representation, recovering the value the user wrote in a
    /// configuration file (`0.4` becomes 2/5, not the nearest binary
    /// fraction).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRatio`] for negative, non-finite, or
    /// overflowing values.
    pub fn from_f64(value: f64) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidRatio {
            input: value.to_string(),
        };

        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        if value == 0.0 {
            return Ok(Self::ZERO);
        }

        let repr = value.to_string();
        match repr.split_once(['e', 'E']) {
            None => Self::parse(&repr),
            Some((mantissa, exponent)) => {
                let base = Self::parse(mantissa)?;
                let exponent: i32 = exponent.parse().map_err(|_| invalid())?;
                let power = 10u64
                    .checked_pow(exponent.unsigned_abs())
                    .ok_or_else(invalid)?;
                if exponent < 0 {
                    base.den
                        .checked_mul(power)
                        .map(|den| Self::reduced(base.num, den))
                        .ok_or_else(invalid)
                } else {
                    base.num
                        .checked_mul(power)
                        .map(|num| Self::reduced(num, base.den))
                        .ok_or_else(invalid)
                }
            }
        }
    }

    /// `floor(value * self)` in integer arithmetic, saturating at `u64::MAX`.
    #[must_use]
    pub fn scale_floor(&self, value: u64) -> u64 {
        let scaled = u128::from(value) * u128::from(self.num) / u128::from(self.den);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// `1 - self`, clamping to zero for ratios above one.
    #[must_use]
    pub fn complement(&self) -> Self {
        if self.num >= self.den {
            return Self::ZERO;
        }
        Self::reduced(self.den - self.num, self.den)
    }

    /// Lossy conversion for display and trace formatting.
    #[allow(clippy::cast_precision_loss)] // display only, exactness not required
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Ratio {
    fn reduced(num: u64, den: u64) -> Self {
        if num == 0 {
            return Self::ZERO;
        }
        let g = gcd(num, den);
        Self {
            num: num / g,
            den: den / g,
        }
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.num) * u128::from(other.den);
        let rhs = u128::from(other.num) * u128::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RatioVisitor;

        impl Visitor<'_> for RatioVisitor {
            type Value = Ratio;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative decimal number or string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Ratio::reduced(value, 1))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(|v| Ratio::reduced(v, 1))
                    .map_err(|_| E::custom(format!("ratio cannot be negative: {value}")))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ratio::from_f64(value).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ratio::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RatioVisitor)
    }
}
