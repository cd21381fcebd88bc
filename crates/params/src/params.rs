//! Market module parameter schema, defaults and validation

use market_types::{Dec, Denom, BLOCKS_PER_DAY, MICRO_MNT_DENOM, MICRO_UNIT};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;
use crate::tobin_tax::{TobinTax, TobinTaxList};

/// Governed parameters of the market module.
///
/// Field names are part of the query surface consumed by external tooling and
/// must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Reference liquidity pool size, in micro SDR
    pub base_pool: Dec,
    /// Blocks for the pool to revert to `base_pool`
    pub pool_recovery_period: i64,
    /// Floor on the swap spread
    pub min_spread: Dec,
    /// Default tax charged on swaps between stable denominations
    pub tobin_tax: Dec,
    /// Per-denomination overrides of `tobin_tax`
    pub illiquid_tobin_tax_list: TobinTaxList,
}

/// 250,000 SDR expressed in micro SDR.
pub fn default_base_pool() -> Dec {
    Dec::new(250_000 * MICRO_UNIT)
}

pub const DEFAULT_POOL_RECOVERY_PERIOD: i64 = BLOCKS_PER_DAY;

/// 2%
pub fn default_min_spread() -> Dec {
    Dec::with_prec(2, 2)
}

/// 0.25%
pub fn default_tobin_tax() -> Dec {
    Dec::with_prec(25, 4)
}

pub fn default_illiquid_tobin_tax_list() -> TobinTaxList {
    vec![TobinTax::new(
        Denom::from_static(MICRO_MNT_DENOM),
        Dec::with_prec(2, 2),
    )]
    .into()
}

/// Canonical genesis parameters.
pub fn default_params() -> MarketParams {
    MarketParams {
        base_pool: default_base_pool(),
        pool_recovery_period: DEFAULT_POOL_RECOVERY_PERIOD,
        min_spread: default_min_spread(),
        tobin_tax: default_tobin_tax(),
        illiquid_tobin_tax_list: default_illiquid_tobin_tax_list(),
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        default_params()
    }
}

impl MarketParams {
    /// Check the whole set; the first violated bound is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_pool.is_negative() {
            return Err(ValidationError::NegativeBasePool(self.base_pool));
        }
        if self.pool_recovery_period <= 0 {
            return Err(ValidationError::NonPositivePoolRecoveryPeriod(
                self.pool_recovery_period,
            ));
        }
        if !self.min_spread.is_unit_interval() {
            return Err(ValidationError::MinSpreadOutOfRange(self.min_spread));
        }
        if !self.tobin_tax.is_unit_interval() {
            return Err(ValidationError::TobinTaxOutOfRange(self.tobin_tax));
        }
        self.illiquid_tobin_tax_list.validate()
    }
}

impl fmt::Display for MarketParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Market Params:")?;
        writeln!(f, "  BasePool:             {}", self.base_pool)?;
        writeln!(f, "  PoolRecoveryPeriod:   {}", self.pool_recovery_period)?;
        writeln!(f, "  MinSpread:            {}", self.min_spread)?;
        writeln!(f, "  TobinTax:             {}", self.tobin_tax)?;
        write!(f, "  IlliquidTobinTaxList: {}", self.illiquid_tobin_tax_list)
    }
}
