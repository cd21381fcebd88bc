//! Error types for the module codec

use market_governance::GovError;
use market_params::ParamsError;
use market_types::{Coin, Denom};
use thiserror::Error;

/// Startup-time registry misconfiguration. Never expected at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("codec is sealed; cannot register {type_name} as {tag:?}")]
    Sealed {
        tag: &'static str,
        type_name: &'static str,
    },

    #[error("tag {tag:?} already registered for {existing}; cannot register {type_name}")]
    DuplicateTag {
        tag: &'static str,
        existing: &'static str,
        type_name: &'static str,
    },

    #[error("type {type_name} already registered as {existing:?}; cannot register as {tag:?}")]
    DuplicateType {
        tag: &'static str,
        existing: &'static str,
        type_name: &'static str,
    },
}

/// Errors surfaced while encoding or decoding module messages.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("codec must be sealed before use")]
    NotSealed,

    #[error("type {0} is not registered with the codec")]
    UnregisteredType(&'static str),

    #[error("unknown type tag {0:?}")]
    UnknownTag(String),

    #[error("malformed message bytes: {0}")]
    Malformed(#[source] bincode::Error),

    #[error("failed to encode {tag}: {source}")]
    Encode {
        tag: &'static str,
        source: bincode::Error,
    },

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stateless message checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsgError {
    #[error("{0} address cannot be empty")]
    EmptyAddress(&'static str),

    #[error("offer coin must be positive, is {0}")]
    NonPositiveOffer(Coin),

    #[error("recursive swap: offer and ask denom are both {0}")]
    RecursiveSwap(Denom),

    #[error(transparent)]
    Proposal(#[from] GovError),
}

/// Errors raised while executing an accepted proposal.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unrecognized market proposal content: {0}")]
    Unrecognized(&'static str),

    #[error(transparent)]
    Gov(#[from] GovError),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
