//! Parameter store binding.
//!
//! Each field of [`MarketParams`] lives under its own key inside the module
//! namespace so that pricing code can point-read a single value. The mapping
//! from field to key is the explicit table returned by [`param_set_pairs`].

use market_storage::{KvStore, PrefixStore, WriteBatch};
use market_types::Dec;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::errors::{ParamsError, Result};
use crate::params::MarketParams;
use crate::tobin_tax::TobinTaxList;

/// Namespace every market parameter key is stored under.
pub const DEFAULT_PARAMSPACE: &str = "market";

/// Storage keys, one per parameter. Changing any of these orphans state.
pub mod keys {
    pub const BASE_POOL: &str = "basepool";
    pub const POOL_RECOVERY_PERIOD: &str = "poolrecoveryperiod";
    pub const MIN_SPREAD: &str = "minspread";
    pub const TOBIN_TAX: &str = "tobintax";
    pub const ILLIQUID_TOBIN_TAX_LIST: &str = "illiquidtobintaxlist";
}

type Encoder = fn(&MarketParams) -> serde_json::Result<Vec<u8>>;
type Decoder = fn(&mut MarketParams, &[u8]) -> serde_json::Result<()>;

/// One row of the field-to-key table.
#[derive(Clone, Copy)]
pub struct ParamSetPair {
    pub key: &'static str,
    encode: Encoder,
    decode: Decoder,
}

/// The complete field-to-key table, in field declaration order.
pub fn param_set_pairs() -> [ParamSetPair; 5] {
    [
        ParamSetPair {
            key: keys::BASE_POOL,
            encode: |p| serde_json::to_vec(&p.base_pool),
            decode: |p, raw| {
                p.base_pool = serde_json::from_slice(raw)?;
                Ok(())
            },
        },
        ParamSetPair {
            key: keys::POOL_RECOVERY_PERIOD,
            encode: |p| serde_json::to_vec(&p.pool_recovery_period),
            decode: |p, raw| {
                p.pool_recovery_period = serde_json::from_slice(raw)?;
                Ok(())
            },
        },
        ParamSetPair {
            key: keys::MIN_SPREAD,
            encode: |p| serde_json::to_vec(&p.min_spread),
            decode: |p, raw| {
                p.min_spread = serde_json::from_slice(raw)?;
                Ok(())
            },
        },
        ParamSetPair {
            key: keys::TOBIN_TAX,
            encode: |p| serde_json::to_vec(&p.tobin_tax),
            decode: |p, raw| {
                p.tobin_tax = serde_json::from_slice(raw)?;
                Ok(())
            },
        },
        ParamSetPair {
            key: keys::ILLIQUID_TOBIN_TAX_LIST,
            encode: |p| serde_json::to_vec(&p.illiquid_tobin_tax_list),
            decode: |p, raw| {
                p.illiquid_tobin_tax_list = serde_json::from_slice(raw)?;
                Ok(())
            },
        },
    ]
}

/// Resolve a user-supplied key name to its static table entry.
pub fn lookup_key(key: &str) -> Result<&'static str> {
    param_set_pairs()
        .iter()
        .map(|pair| pair.key)
        .find(|known| *known == key)
        .ok_or_else(|| ParamsError::UnknownKey(key.to_string()))
}

/// Market parameters bound to a key-value store.
pub struct ParamSubspace<S> {
    store: PrefixStore<S>,
}

impl<S: KvStore> ParamSubspace<S> {
    pub fn new(store: S) -> Self {
        let prefix = format!("{DEFAULT_PARAMSPACE}/").into_bytes();
        Self {
            store: PrefixStore::new(store, prefix),
        }
    }

    /// Read the full set, reporting missing or corrupt keys as errors.
    pub fn try_get(&self) -> Result<MarketParams> {
        let mut params = MarketParams::default();
        for pair in param_set_pairs() {
            let raw = self.read_key(pair.key)?;
            (pair.decode)(&mut params, &raw)
                .map_err(|source| ParamsError::Corrupt { key: pair.key, source })?;
        }
        Ok(params)
    }

    /// Read the full set.
    ///
    /// # Panics
    ///
    /// Panics if any key is absent or undecodable. Genesis writes every key,
    /// so this only happens on a corrupt store.
    pub fn get(&self) -> MarketParams {
        match self.try_get() {
            Ok(params) => params,
            Err(err) => {
                error!(target: "market::params", "parameter store unreadable: {err}");
                panic!("market parameter store is corrupt: {err}");
            }
        }
    }

    /// Validate `params` and, only if valid, persist every field in one batch.
    pub fn set(&self, params: &MarketParams) -> Result<()> {
        if let Err(err) = params.validate() {
            warn!(
                target: "market::params",
                key = err.key(),
                "rejected parameter update: {err}"
            );
            return Err(err.into());
        }

        let duplicates = params.illiquid_tobin_tax_list.duplicate_denoms();
        if !duplicates.is_empty() {
            warn!(
                target: "market::params",
                ?duplicates,
                "illiquid tobin tax list repeats denominations; first entry wins"
            );
        }

        let mut batch = WriteBatch::new();
        for pair in param_set_pairs() {
            let bytes = (pair.encode)(params)
                .map_err(|source| ParamsError::Encode { key: pair.key, source })?;
            batch.put(pair.key.as_bytes(), bytes);
        }
        self.store.write_batch(batch)?;

        info!(
            target: "market::params",
            base_pool = %params.base_pool,
            pool_recovery_period = params.pool_recovery_period,
            min_spread = %params.min_spread,
            tobin_tax = %params.tobin_tax,
            illiquid_entries = params.illiquid_tobin_tax_list.len(),
            "market parameters updated"
        );
        Ok(())
    }

    /// True when every parameter key is present.
    pub fn is_initialized(&self) -> Result<bool> {
        for pair in param_set_pairs() {
            if !self.store.has(pair.key.as_bytes())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Raw JSON value of one parameter, for query tooling.
    pub fn get_raw(&self, key: &str) -> Result<serde_json::Value> {
        let key = lookup_key(key)?;
        let raw = self.read_key(key)?;
        serde_json::from_slice(&raw).map_err(|source| ParamsError::Corrupt { key, source })
    }

    pub fn try_get_param<T: DeserializeOwned>(&self, key: &'static str) -> Result<T> {
        let raw = self.read_key(key)?;
        serde_json::from_slice(&raw).map_err(|source| ParamsError::Corrupt { key, source })
    }

    fn must_get_param<T: DeserializeOwned>(&self, key: &'static str) -> T {
        match self.try_get_param(key) {
            Ok(value) => value,
            Err(err) => {
                error!(target: "market::params", key, "parameter unreadable: {err}");
                panic!("market parameter store is corrupt: {err}");
            }
        }
    }

    pub fn base_pool(&self) -> Dec {
        self.must_get_param(keys::BASE_POOL)
    }

    pub fn pool_recovery_period(&self) -> i64 {
        self.must_get_param(keys::POOL_RECOVERY_PERIOD)
    }

    pub fn min_spread(&self) -> Dec {
        self.must_get_param(keys::MIN_SPREAD)
    }

    pub fn tobin_tax(&self) -> Dec {
        self.must_get_param(keys::TOBIN_TAX)
    }

    pub fn illiquid_tobin_tax_list(&self) -> TobinTaxList {
        self.must_get_param(keys::ILLIQUID_TOBIN_TAX_LIST)
    }

    fn read_key(&self, key: &'static str) -> Result<Vec<u8>> {
        self.store
            .get(key.as_bytes())?
            .ok_or(ParamsError::MissingKey { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_storage::MemoryStore;
    use std::collections::BTreeSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: BTreeSet<&str> = param_set_pairs().iter().map(|p| p.key).collect();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_keys_are_namespaced() {
        let backing = MemoryStore::new();
        let subspace = ParamSubspace::new(&backing);
        subspace.set(&MarketParams::default()).unwrap();

        assert_eq!(backing.len(), 5);
        assert_eq!(
            backing.get(b"market/tobintax").unwrap(),
            Some(b"\"0.0025\"".to_vec())
        );
        assert_eq!(
            backing.get(b"market/poolrecoveryperiod").unwrap(),
            Some(b"14400".to_vec())
        );
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key("minspread").unwrap(), keys::MIN_SPREAD);
        assert!(matches!(
            lookup_key("MinSpread"),
            Err(ParamsError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_get_raw() {
        let backing = MemoryStore::new();
        let subspace = ParamSubspace::new(&backing);
        subspace.set(&MarketParams::default()).unwrap();
        assert_eq!(
            subspace.get_raw("basepool").unwrap(),
            serde_json::json!("250000000000")
        );
    }
}
