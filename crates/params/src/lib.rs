//! Market Parameters
//!
//! Governed configuration of the market (currency exchange) module:
//! - ⚙️ parameter schema and genesis defaults
//! - ✅ all-or-nothing validation of candidate parameter sets
//! - 📋 ordered per-denomination tobin tax overrides
//! - 💾 per-field storage binding that gates every write through validation

pub mod errors;
pub mod genesis;
pub mod params;
pub mod subspace;
pub mod tobin_tax;

pub use errors::*;
pub use genesis::*;
pub use params::*;
pub use subspace::*;
pub use tobin_tax::*;
