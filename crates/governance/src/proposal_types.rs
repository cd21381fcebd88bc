//! Governance-side table of accepted proposal types.
//!
//! Module codecs register their proposal type here under the same tag they
//! use on the wire, so a proposal the governance layer accepts is always one
//! the codec can decode.

use std::collections::BTreeSet;
use tracing::debug;

use crate::content::Content;
use crate::errors::{GovError, Result};

/// Callback the governance collaborator exposes to modules at startup.
pub trait ProposalTypeRegistrar {
    /// Record `proposal_type`.
    ///
    /// # Panics
    ///
    /// Implementations panic if the type is already registered; this only
    /// runs during process initialization.
    fn register_proposal_type(&mut self, proposal_type: &'static str);
}

#[derive(Debug, Default, Clone)]
pub struct ProposalTypeTable {
    types: BTreeSet<&'static str>,
}

impl ProposalTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_register(&mut self, proposal_type: &'static str) -> Result<()> {
        if !self.types.insert(proposal_type) {
            return Err(GovError::DuplicateProposalType(proposal_type.to_string()));
        }
        debug!(target: "gov", proposal_type, "registered proposal type");
        Ok(())
    }

    pub fn contains(&self, proposal_type: &str) -> bool {
        self.types.contains(proposal_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.iter().copied()
    }

    /// Admission check run before a proposal enters voting.
    pub fn check_content(&self, content: &dyn Content) -> Result<()> {
        if !self.contains(content.proposal_type()) {
            return Err(GovError::UnregisteredProposalType(
                content.proposal_type().to_string(),
            ));
        }
        content.validate_basic()
    }
}

impl ProposalTypeRegistrar for ProposalTypeTable {
    fn register_proposal_type(&mut self, proposal_type: &'static str) {
        if let Err(err) = self.try_register(proposal_type) {
            panic!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::validate_abstract;

    struct Signal;

    impl Content for Signal {
        fn title(&self) -> &str {
            "Signal"
        }
        fn description(&self) -> &str {
            "Non-binding signal"
        }
        fn proposal_route(&self) -> &'static str {
            "gov"
        }
        fn proposal_type(&self) -> &'static str {
            "gov/Signal"
        }
        fn validate_basic(&self) -> Result<()> {
            validate_abstract(self)
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut table = ProposalTypeTable::new();
        assert!(table.is_empty());
        table.register_proposal_type("gov/Signal");
        assert!(table.contains("gov/Signal"));
        assert!(!table.contains("gov/Other"));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["gov/Signal"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_try_register_duplicate() {
        let mut table = ProposalTypeTable::new();
        table.try_register("gov/Signal").unwrap();
        assert_eq!(
            table.try_register("gov/Signal"),
            Err(GovError::DuplicateProposalType("gov/Signal".into()))
        );
    }

    #[test]
    #[should_panic(expected = "Proposal type already registered")]
    fn test_register_duplicate_panics() {
        let mut table = ProposalTypeTable::new();
        table.register_proposal_type("gov/Signal");
        table.register_proposal_type("gov/Signal");
    }

    #[test]
    fn test_check_content() {
        let mut table = ProposalTypeTable::new();
        assert_eq!(
            table.check_content(&Signal),
            Err(GovError::UnregisteredProposalType("gov/Signal".into()))
        );
        table.register_proposal_type("gov/Signal");
        assert!(table.check_content(&Signal).is_ok());
    }
}
