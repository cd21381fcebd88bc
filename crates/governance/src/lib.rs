//! Market Governance Bindings
//!
//! The slice of the governance subsystem the market module talks to:
//! - 📜 the `Content` contract every proposal payload implements
//! - 🗂️ the proposal-type table modules register into at startup
//!
//! Voting and tallying live outside this crate.

pub mod content;
pub mod errors;
pub mod proposal_types;

pub use content::*;
pub use errors::*;
pub use proposal_types::*;
