//! Denominations, coins and chain-wide unit constants.
//!
//! | Denom  | Asset                  |
//! |--------|------------------------|
//! | `uluna`| micro Luna (stake)     |
//! | `usdr` | micro SDR (reference)  |
//! | `uusd` | micro USD              |
//! | `ukrw` | micro KRW              |
//! | `umnt` | micro MNT              |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One whole unit expressed in micro units.
pub const MICRO_UNIT: i64 = 1_000_000;

pub const BLOCKS_PER_MINUTE: i64 = 10;
pub const BLOCKS_PER_HOUR: i64 = BLOCKS_PER_MINUTE * 60;
pub const BLOCKS_PER_DAY: i64 = BLOCKS_PER_HOUR * 24;

pub const MICRO_LUNA_DENOM: &str = "uluna";
pub const MICRO_SDR_DENOM: &str = "usdr";
pub const MICRO_USD_DENOM: &str = "uusd";
pub const MICRO_KRW_DENOM: &str = "ukrw";
pub const MICRO_MNT_DENOM: &str = "umnt";

static DENOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9/:._-]{2,127}$").expect("denom pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenomError {
    #[error("invalid denomination {0:?}")]
    Invalid(String),
}

/// Currency unit identifier within the multi-asset ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    pub fn new(denom: impl Into<String>) -> Result<Self, DenomError> {
        let denom = denom.into();
        if !DENOM_RE.is_match(&denom) {
            return Err(DenomError::Invalid(denom));
        }
        Ok(Denom(denom))
    }

    /// Build a denom from a compile-time constant.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is not a valid denomination.
    pub fn from_static(denom: &'static str) -> Self {
        match Denom::new(denom) {
            Ok(denom) => denom,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Denom {
    type Error = DenomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Denom::new(value)
    }
}

impl From<Denom> for String {
    fn from(value: Denom) -> Self {
        value.0
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An integer amount of a single denomination.
///
/// `amount` serializes as a decimal string: JSON consumers cannot hold the
/// full `u128` range as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    #[serde(with = "amount_string")]
    pub amount: u128,
}

mod amount_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("invalid coin amount {raw:?}")));
        }
        raw.parse().map_err(de::Error::custom)
    }
}

impl Coin {
    pub fn new(denom: Denom, amount: u128) -> Self {
        Self { denom, amount }
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_constants() {
        assert_eq!(BLOCKS_PER_DAY, 14_400);
    }

    #[test]
    fn test_denom_validation() {
        assert!(Denom::new("umnt").is_ok());
        assert!(Denom::new("ibc/27394FB092D2ECCD").is_ok());
        assert!(Denom::new("").is_err());
        assert!(Denom::new("ab").is_err());
        assert!(Denom::new("1abc").is_err());
        assert!(Denom::new("has space").is_err());
    }

    #[test]
    fn test_denom_serde_rejects_invalid() {
        let denom: Denom = serde_json::from_str("\"ukrw\"").unwrap();
        assert_eq!(denom.as_str(), MICRO_KRW_DENOM);
        assert!(serde_json::from_str::<Denom>("\"9bad\"").is_err());
    }

    #[test]
    #[should_panic(expected = "invalid denomination")]
    fn test_from_static_panics_on_invalid() {
        Denom::from_static("x");
    }

    #[test]
    fn test_coin_amount_is_a_json_string() {
        let coin = Coin::new(Denom::from_static(MICRO_KRW_DENOM), u128::MAX);
        let value = serde_json::to_value(&coin).unwrap();
        assert_eq!(value["amount"], u128::MAX.to_string());

        let back: Coin = serde_json::from_value(value).unwrap();
        assert_eq!(back, coin);

        for bad in [
            r#"{"denom":"ukrw","amount":5}"#,
            r#"{"denom":"ukrw","amount":"-5"}"#,
            r#"{"denom":"ukrw","amount":"+5"}"#,
        ] {
            assert!(serde_json::from_str::<Coin>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_coin_display() {
        let coin = Coin::new(Denom::from_static(MICRO_LUNA_DENOM), 1_500);
        assert_eq!(coin.to_string(), "1500uluna");
        assert!(coin.is_positive());
        assert!(!Coin::new(Denom::from_static(MICRO_LUNA_DENOM), 0).is_positive());
    }
}
