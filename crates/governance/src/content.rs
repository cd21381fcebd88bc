//! Proposal content contract

use crate::errors::{GovError, Result};

pub const MAX_TITLE_LENGTH: usize = 140;
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Anything a governance proposal can carry.
pub trait Content {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    /// Module that executes the proposal once accepted
    fn proposal_route(&self) -> &'static str;
    /// Tag under which the proposal type is registered
    fn proposal_type(&self) -> &'static str;
    fn validate_basic(&self) -> Result<()>;
}

/// Title/description checks shared by every content type.
pub fn validate_abstract(content: &dyn Content) -> Result<()> {
    let title = content.title().trim();
    if title.is_empty() {
        return Err(GovError::InvalidTitle("title cannot be blank".into()));
    }
    if content.title().len() > MAX_TITLE_LENGTH {
        return Err(GovError::InvalidTitle(format!(
            "title is longer than max length of {MAX_TITLE_LENGTH}"
        )));
    }

    let description = content.description().trim();
    if description.is_empty() {
        return Err(GovError::InvalidDescription(
            "description cannot be blank".into(),
        ));
    }
    if content.description().len() > MAX_DESCRIPTION_LENGTH {
        return Err(GovError::InvalidDescription(format!(
            "description is longer than max length of {MAX_DESCRIPTION_LENGTH}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Text {
        title: String,
        description: String,
    }

    impl Content for Text {
        fn title(&self) -> &str {
            &self.title
        }
        fn description(&self) -> &str {
            &self.description
        }
        fn proposal_route(&self) -> &'static str {
            "gov"
        }
        fn proposal_type(&self) -> &'static str {
            "Text"
        }
        fn validate_basic(&self) -> Result<()> {
            validate_abstract(self)
        }
    }

    fn text(title: &str, description: &str) -> Text {
        Text {
            title: title.into(),
            description: description.into(),
        }
    }

    #[test]
    fn test_validate_abstract() {
        assert!(text("Lower spread", "Reduce min spread to 1%").validate_basic().is_ok());
        assert!(matches!(
            text("  ", "desc").validate_basic(),
            Err(GovError::InvalidTitle(_))
        ));
        assert!(matches!(
            text(&"t".repeat(MAX_TITLE_LENGTH + 1), "desc").validate_basic(),
            Err(GovError::InvalidTitle(_))
        ));
        assert!(matches!(
            text("title", "").validate_basic(),
            Err(GovError::InvalidDescription(_))
        ));
        assert!(matches!(
            text("title", &"d".repeat(MAX_DESCRIPTION_LENGTH + 1)).validate_basic(),
            Err(GovError::InvalidDescription(_))
        ));
    }
}
