//! Market module codec wiring.
//!
//! Tags are permanent: historical bytes on every node depend on them.

use market_governance::ProposalTypeRegistrar;
use std::sync::Arc;

use crate::codec::Codec;
use crate::msgs::{MsgSwap, MsgSwapSend};
use crate::proposal::ParamsChangeProposal;

pub const MODULE_NAME: &str = "market";
pub const ROUTER_KEY: &str = MODULE_NAME;

pub const MSG_SWAP_TAG: &str = "market/MsgSwap";
pub const MSG_SWAP_SEND_TAG: &str = "market/MsgSwapSend";
pub const PARAMS_CHANGE_PROPOSAL_TAG: &str = "market/ParamsChangeProposal";

/// Register every market message and proposal type on `codec`.
pub fn register_codec(codec: &mut Codec) {
    codec.register::<MsgSwap>(MSG_SWAP_TAG);
    codec.register::<MsgSwapSend>(MSG_SWAP_SEND_TAG);
    codec.register::<ParamsChangeProposal>(PARAMS_CHANGE_PROPOSAL_TAG);
}

/// Build the sealed module codec and bind the parameter-change proposal into
/// the governance proposal-type table under the same tag.
///
/// Call once during process initialization.
pub fn module_codec(gov: &mut impl ProposalTypeRegistrar) -> Arc<Codec> {
    let mut codec = Codec::new();
    register_codec(&mut codec);
    codec.seal();

    gov.register_proposal_type(PARAMS_CHANGE_PROPOSAL_TAG);
    Arc::new(codec)
}
