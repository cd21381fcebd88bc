//! Error types for the Governance module

use thiserror::Error;

/// Errors that can occur in the Governance module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovError {
    /// Proposal title is empty or too long
    #[error("Invalid proposal title: {0}")]
    InvalidTitle(String),

    /// Proposal description is empty or too long
    #[error("Invalid proposal description: {0}")]
    InvalidDescription(String),

    /// Proposal type not present in the proposal-type table
    #[error("Unregistered proposal type: {0}")]
    UnregisteredProposalType(String),

    /// Proposal type registered twice
    #[error("Proposal type already registered: {0}")]
    DuplicateProposalType(String),

    /// Proposal content failed its own checks
    #[error("Invalid proposal content: {0}")]
    InvalidContent(String),
}

/// Result type for Governance operations
pub type Result<T> = std::result::Result<T, GovError>;
