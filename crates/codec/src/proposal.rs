//! Governance proposal replacing the market parameter set

use market_governance::{validate_abstract, Content, GovError};
use market_params::MarketParams;
use serde::{Deserialize, Serialize};

use crate::module::{PARAMS_CHANGE_PROPOSAL_TAG, ROUTER_KEY};

/// Replaces every market parameter at once when executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsChangeProposal {
    pub title: String,
    pub description: String,
    pub params: MarketParams,
}

impl ParamsChangeProposal {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        params: MarketParams,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            params,
        }
    }
}

impl Content for ParamsChangeProposal {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn proposal_route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn proposal_type(&self) -> &'static str {
        PARAMS_CHANGE_PROPOSAL_TAG
    }

    fn validate_basic(&self) -> Result<(), GovError> {
        validate_abstract(self)?;
        self.params
            .validate()
            .map_err(|err| GovError::InvalidContent(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_params::default_params;
    use market_types::Dec;

    #[test]
    fn test_content_accessors() {
        let proposal = ParamsChangeProposal::new("Raise tax", "Raise tobin tax", default_params());
        assert_eq!(proposal.proposal_route(), "market");
        assert_eq!(proposal.proposal_type(), "market/ParamsChangeProposal");
        assert!(proposal.validate_basic().is_ok());
    }

    #[test]
    fn test_invalid_params_fail_validate_basic() {
        let proposal = ParamsChangeProposal::new(
            "Bad",
            "Spread above one",
            MarketParams {
                min_spread: Dec::new(2),
                ..default_params()
            },
        );
        let err = proposal.validate_basic().unwrap_err();
        assert!(matches!(err, GovError::InvalidContent(ref m) if m.contains("MinSpread")));
    }
}
