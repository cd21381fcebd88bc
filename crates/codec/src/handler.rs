//! Execution of accepted market proposals

use market_governance::validate_abstract;
use market_params::ParamSubspace;
use market_storage::KvStore;
use tracing::info;

use crate::codec::{Codec, ModuleMsg};
use crate::errors::HandlerError;

/// Applies accepted parameter-change proposals to the parameter store.
pub struct ParamsChangeHandler<'a, S> {
    subspace: &'a ParamSubspace<S>,
}

impl<'a, S: KvStore> ParamsChangeHandler<'a, S> {
    pub fn new(subspace: &'a ParamSubspace<S>) -> Self {
        Self { subspace }
    }

    /// Replace the stored parameter set with the proposal's. A rejected
    /// proposal leaves the store untouched.
    pub fn handle(&self, msg: &ModuleMsg) -> Result<(), HandlerError> {
        let ModuleMsg::ParamsChange(proposal) = msg else {
            return Err(HandlerError::Unrecognized(msg.type_name()));
        };

        validate_abstract(proposal)?;
        self.subspace.set(&proposal.params)?;
        info!(
            target: "market::gov",
            title = %proposal.title,
            "executed market params change proposal"
        );
        Ok(())
    }
}

/// Decode proposal bytes with the sealed codec and execute them.
pub fn execute_proposal_bytes<S: KvStore>(
    codec: &Codec,
    subspace: &ParamSubspace<S>,
    bytes: &[u8],
) -> Result<(), HandlerError> {
    let msg = codec.decode(bytes)?;
    ParamsChangeHandler::new(subspace).handle(&msg)
}
