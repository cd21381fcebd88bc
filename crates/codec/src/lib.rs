//! Market Codec
//!
//! Deterministic wire encoding for the market module:
//! - 🔒 a registry of concrete message/proposal types, sealed after startup
//! - 🏷️ permanent string tags and tag-dispatched polymorphic decode
//! - 🗳️ the parameter-change proposal, its governance binding and handler

pub mod codec;
pub mod errors;
pub mod handler;
pub mod module;
pub mod msgs;
pub mod proposal;

pub use codec::*;
pub use errors::*;
pub use handler::*;
pub use module::*;
pub use msgs::*;
pub use proposal::*;
