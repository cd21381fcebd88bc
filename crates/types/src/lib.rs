//! Market Types
//!
//! Deterministic primitives shared by the market module crates:
//! - `Dec`: fixed-precision decimal with a canonical string form
//! - `Denom` / `Coin`: validated currency identifiers and amounts
//! - chain-wide unit and block-time constants

pub mod currency;
pub mod dec;

pub use currency::*;
pub use dec::*;
