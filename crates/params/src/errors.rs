//! Error types for the market parameter subsystem

use market_storage::StorageError;
use market_types::{Dec, Denom};
use thiserror::Error;

use crate::subspace::keys;

/// A candidate parameter set violated one of its bounds.
///
/// The message always carries the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("BasePool should be positive or zero, is {0}")]
    NegativeBasePool(Dec),

    #[error("PoolRecoveryPeriod should be positive, is {0}")]
    NonPositivePoolRecoveryPeriod(i64),

    #[error("MinSpread should be a value between [0,1], is {0}")]
    MinSpreadOutOfRange(Dec),

    #[error("TobinTax should be a value between [0,1], is {0}")]
    TobinTaxOutOfRange(Dec),

    #[error("IlliquidTobinTaxList rate for {denom} should be a value between [0,1], is {rate}")]
    IlliquidTobinTaxOutOfRange { denom: Denom, rate: Dec },
}

impl ValidationError {
    /// Storage key of the parameter that failed.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::NegativeBasePool(_) => keys::BASE_POOL,
            ValidationError::NonPositivePoolRecoveryPeriod(_) => keys::POOL_RECOVERY_PERIOD,
            ValidationError::MinSpreadOutOfRange(_) => keys::MIN_SPREAD,
            ValidationError::TobinTaxOutOfRange(_) => keys::TOBIN_TAX,
            ValidationError::IlliquidTobinTaxOutOfRange { .. } => keys::ILLIQUID_TOBIN_TAX_LIST,
        }
    }
}

/// Errors raised by the parameter store binding
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("parameter {key} is missing from the store")]
    MissingKey { key: &'static str },

    #[error("parameter {key} holds undecodable bytes: {source}")]
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("parameter {key} could not be encoded: {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("unknown parameter key {0:?}")]
    UnknownKey(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ParamsError>;
