//! Fixed-point signed decimal used for every ratio and amount parameter.
//!
//! A `Dec` is an `i128` count of atoms, one atom being `10^-18`. Every value
//! therefore carries exactly [`PRECISION`] fractional digits regardless of its
//! integer magnitude, and no operation drifts below that precision:
//!
//! 1. **No floating point**: values are parsed from and rendered to decimal
//!    strings only; arithmetic is integer based.
//! 2. **Canonical form**: the serialized form is the shortest exact decimal
//!    string (no trailing zeros, no `-0`), so two equal values always produce
//!    the same bytes on every node.
//!
//! The representable range is `[Dec::MIN, Dec::MAX]`, about `±1.7 * 10^20`.
//! Anything outside it is rejected with [`DecError::OutOfRange`] on parse and
//! yields `None` from the checked operations.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits every `Dec` carries.
pub const PRECISION: u32 = 18;

/// Atoms per whole unit.
const ATOMS_PER_UNIT: i128 = 10i128.pow(PRECISION);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecError {
    #[error("invalid decimal {input:?}: {reason}")]
    Invalid { input: String, reason: &'static str },

    #[error("decimal {input:?} has more than {max} fractional digits")]
    TooPrecise { input: String, max: u32 },

    #[error("decimal {input:?} is outside the representable range [{min}, {max}]")]
    OutOfRange { input: String, min: Dec, max: Dec },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dec(i128);

impl Dec {
    pub const ZERO: Dec = Dec(0);
    pub const ONE: Dec = Dec(ATOMS_PER_UNIT);
    pub const MAX: Dec = Dec(i128::MAX);
    pub const MIN: Dec = Dec(i128::MIN);

    /// Integer value with no fractional part.
    pub fn new(value: i64) -> Self {
        // |i64| * 10^18 < 2^127, so this cannot overflow.
        Dec(value as i128 * ATOMS_PER_UNIT)
    }

    /// `value * 10^-prec`, e.g. `with_prec(25, 4)` is `0.0025`.
    ///
    /// # Panics
    ///
    /// Panics if `prec` exceeds [`PRECISION`]. Only meant for constants.
    pub fn with_prec(value: i64, prec: u32) -> Self {
        assert!(
            prec <= PRECISION,
            "decimal precision {prec} exceeds maximum {PRECISION}"
        );
        Dec(value as i128 * 10i128.pow(PRECISION - prec))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when `0 <= self <= 1`.
    pub fn is_unit_interval(&self) -> bool {
        !self.is_negative() && *self <= Dec::ONE
    }

    pub fn checked_add(self, other: Dec) -> Option<Dec> {
        self.0.checked_add(other.0).map(Dec)
    }

    pub fn checked_sub(self, other: Dec) -> Option<Dec> {
        self.0.checked_sub(other.0).map(Dec)
    }

    /// Product rounded half-to-even to [`PRECISION`] digits. `None` when the
    /// result leaves the representable range.
    pub fn checked_mul(self, other: Dec) -> Option<Dec> {
        let product = BigInt::from(self.0) * BigInt::from(other.0);
        div_round_half_even(product, BigInt::from(ATOMS_PER_UNIT))
            .to_i128()
            .map(Dec)
    }

    /// Quotient rounded half-to-even to [`PRECISION`] digits. `None` on a zero
    /// divisor or when the result leaves the representable range.
    pub fn checked_quo(self, other: Dec) -> Option<Dec> {
        if other.is_zero() {
            return None;
        }
        let scaled = BigInt::from(self.0) * BigInt::from(ATOMS_PER_UNIT);
        div_round_half_even(scaled, BigInt::from(other.0))
            .to_i128()
            .map(Dec)
    }
}

/// `num / den` rounded to the nearest integer, ties to even. `den != 0`.
fn div_round_half_even(mut num: BigInt, mut den: BigInt) -> BigInt {
    if den.is_negative() {
        num = -num;
        den = -den;
    }
    let quotient = &num / &den;
    let twice_remainder: BigInt = (&num % &den).abs() * 2;
    let away_from_zero = match twice_remainder.cmp(&den) {
        Ordering::Greater => true,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
        Ordering::Less => false,
    };
    if !away_from_zero {
        return quotient;
    }
    if num.is_negative() {
        quotient - 1
    } else {
        quotient + 1
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let unit = ATOMS_PER_UNIT as u128;
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = magnitude / unit;
        let fraction = magnitude % unit;
        if fraction == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{fraction:018}");
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| DecError::Invalid {
            input: s.to_string(),
            reason,
        };
        let out_of_range = || DecError::OutOfRange {
            input: s.to_string(),
            min: Dec::MIN,
            max: Dec::MAX,
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        if whole.is_empty() {
            return Err(invalid("missing integer digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("integer part is not a decimal number"));
        }
        let fraction = match fraction {
            Some("") => return Err(invalid("missing fractional digits")),
            Some(digits) if !digits.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(invalid("fractional part is not a decimal number"))
            }
            Some(digits) => digits.trim_end_matches('0'),
            None => "",
        };
        if fraction.len() > PRECISION as usize {
            return Err(DecError::TooPrecise {
                input: s.to_string(),
                max: PRECISION,
            });
        }

        let mut magnitude: u128 = 0;
        let padded = fraction.bytes().chain(std::iter::repeat(b'0')).take(PRECISION as usize);
        for digit in whole.bytes().chain(padded) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(digit - b'0')))
                .ok_or_else(out_of_range)?;
        }

        let atoms = if negative {
            0i128.checked_sub_unsigned(magnitude)
        } else {
            i128::try_from(magnitude).ok()
        };
        atoms.map(Dec).ok_or_else(out_of_range)
    }
}

impl TryFrom<String> for Dec {
    type Error = DecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dec> for String {
    fn from(value: Dec) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn test_with_prec() {
        assert_eq!(Dec::with_prec(2, 2).to_string(), "0.02");
        assert_eq!(Dec::with_prec(25, 4).to_string(), "0.0025");
        assert_eq!(Dec::new(250_000_000_000).to_string(), "250000000000");
        assert_eq!(Dec::with_prec(-15, 1).to_string(), "-1.5");
    }

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(dec("0.0200"), dec("0.02"));
        assert_eq!(dec("0.0200").to_string(), "0.02");
        assert_eq!(dec("-0").to_string(), "0");
        assert_eq!(dec("007.50").to_string(), "7.5");
    }

    #[test]
    fn test_full_precision_at_large_magnitude() {
        let value = dec("250000000000.000000000000000001");
        assert_eq!(value.to_string(), "250000000000.000000000000000001");
        assert_eq!(value.0, 250_000_000_000 * ATOMS_PER_UNIT + 1);
        assert!(value > Dec::new(250_000_000_000));
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(Dec::MAX.to_string().parse::<Dec>().unwrap(), Dec::MAX);
        assert_eq!(Dec::MIN.to_string().parse::<Dec>().unwrap(), Dec::MIN);
        assert!(matches!(
            "100000000000000000000000000000".parse::<Dec>(),
            Err(DecError::OutOfRange { .. })
        ));
        assert!(matches!(
            "-100000000000000000000000000000".parse::<Dec>(),
            Err(DecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage_and_excess_precision() {
        for bad in ["abc", "", "-", ".5", "1.", "1.2.3", "+1", "1e5", "1,5"] {
            assert!(
                matches!(bad.parse::<Dec>(), Err(DecError::Invalid { .. })),
                "{bad:?} should be invalid"
            );
        }
        assert!(matches!(
            "0.0000000000000000001".parse::<Dec>(),
            Err(DecError::TooPrecise { .. })
        ));
        // Trailing zeros beyond the limit carry no precision.
        assert_eq!(dec("0.10000000000000000000"), Dec::with_prec(1, 1));
    }

    #[test]
    fn test_sign_and_interval() {
        assert!(Dec::new(-1).is_negative());
        assert!(!Dec::ZERO.is_negative());
        assert!(Dec::ZERO.is_unit_interval());
        assert!(Dec::ONE.is_unit_interval());
        assert!(!Dec::with_prec(15, 1).is_unit_interval());
        assert!(!Dec::with_prec(-1, 2).is_unit_interval());
    }

    #[test]
    fn test_arithmetic_rounds_half_even() {
        let third = Dec::ONE.checked_quo(Dec::new(3)).unwrap();
        assert_eq!(third.to_string(), "0.333333333333333333");
        let two_thirds = Dec::new(-2).checked_quo(Dec::new(3)).unwrap();
        assert_eq!(two_thirds.to_string(), "-0.666666666666666667");

        // 5e-18 * 0.5 = 2.5e-18 -> 2e-18; 1.5e-17 * 0.5 = 7.5e-18 -> 8e-18
        assert_eq!(
            Dec::with_prec(5, 18).checked_mul(Dec::with_prec(5, 1)),
            Some(Dec::with_prec(2, 18))
        );
        assert_eq!(
            Dec::with_prec(15, 18).checked_mul(Dec::with_prec(5, 1)),
            Some(Dec::with_prec(8, 18))
        );
        assert_eq!(
            Dec::with_prec(-5, 18).checked_mul(Dec::with_prec(5, 1)),
            Some(Dec::with_prec(-2, 18))
        );

        assert_eq!(
            Dec::with_prec(2, 2).checked_add(Dec::with_prec(25, 4)),
            Some(Dec::with_prec(225, 4))
        );
        assert!(Dec::ZERO.checked_quo(Dec::ZERO).is_none());
    }

    #[test]
    fn test_large_products_keep_eighteen_digits() {
        let pool = dec("250000000000.000000000000000001");
        assert_eq!(
            pool.checked_mul(Dec::new(2)).unwrap().to_string(),
            "500000000000.000000000000000002"
        );
        // 625000000 + 2.5e-21 rounds back to the whole number.
        assert_eq!(pool.checked_mul(dec("0.0025")), Some(Dec::new(625_000_000)));
        assert_eq!(
            pool.checked_quo(Dec::new(1_000)).unwrap().to_string(),
            "250000000"
        );
    }

    #[test]
    fn test_overflow_is_none() {
        assert!(Dec::MAX.checked_add(Dec::with_prec(1, 18)).is_none());
        assert!(Dec::MIN.checked_sub(Dec::with_prec(1, 18)).is_none());
        assert!(Dec::MAX.checked_mul(Dec::new(2)).is_none());
        assert!(Dec::MAX.checked_quo(Dec::with_prec(5, 1)).is_none());
        assert_eq!(Dec::MAX.checked_mul(Dec::ONE), Some(Dec::MAX));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let value = dec("1.500");
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"1.5\"");

        let back: Dec = serde_json::from_str("\"1.5\"").unwrap();
        assert_eq!(back, value);

        assert!(serde_json::from_str::<Dec>("\"not-a-number\"").is_err());
        assert!(serde_json::from_str::<Dec>("1.5").is_err());
    }

    #[test]
    fn test_bincode_bytes_are_scale_independent() {
        assert_eq!(
            bincode::serialize(&dec("0.50")).unwrap(),
            bincode::serialize(&dec("0.5")).unwrap()
        );
    }

    proptest::proptest! {
        #[test]
        fn display_parse_is_identity(atoms in proptest::prelude::any::<i128>()) {
            let value = Dec(atoms);
            let parsed: Dec = value.to_string().parse().unwrap();
            proptest::prop_assert_eq!(parsed, value);
        }

        #[test]
        fn mul_by_one_is_identity(atoms in proptest::prelude::any::<i128>()) {
            let value = Dec(atoms);
            proptest::prop_assert_eq!(value.checked_mul(Dec::ONE), Some(value));
        }
    }
}
