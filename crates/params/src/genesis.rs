//! Genesis import/export of market parameters

use market_storage::KvStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{Result, ValidationError};
use crate::params::{default_params, MarketParams};
use crate::subspace::ParamSubspace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: MarketParams,
}

impl GenesisState {
    pub fn new(params: MarketParams) -> Self {
        Self { params }
    }
}

impl Default for GenesisState {
    fn default() -> Self {
        default_genesis()
    }
}

pub fn default_genesis() -> GenesisState {
    GenesisState::new(default_params())
}

pub fn validate_genesis(genesis: &GenesisState) -> std::result::Result<(), ValidationError> {
    genesis.params.validate()
}

/// Write the genesis parameter set. Every key is written, so later reads never
/// observe a partially initialized store.
pub fn init_genesis<S: KvStore>(subspace: &ParamSubspace<S>, genesis: &GenesisState) -> Result<()> {
    subspace.set(&genesis.params)?;
    info!(target: "market::genesis", "initialized market parameters from genesis");
    Ok(())
}

pub fn export_genesis<S: KvStore>(subspace: &ParamSubspace<S>) -> GenesisState {
    GenesisState::new(subspace.get())
}
